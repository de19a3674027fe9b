#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DNSResourceType {
    #[default]
    Unknown,
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    HINFO,
    MX,
    TXT,
    AAAA,
    SRV,
    DS,
    SSHFP,
    DNSKEY,
    TLSA,
    TSIG,
    ANY,
    CAA,
}

impl From<u16> for DNSResourceType {
    fn from(value: u16) -> Self {
        match value {
            1 => DNSResourceType::A,
            2 => DNSResourceType::NS,
            5 => DNSResourceType::CNAME,
            6 => DNSResourceType::SOA,
            12 => DNSResourceType::PTR,
            13 => DNSResourceType::HINFO,
            15 => DNSResourceType::MX,
            16 => DNSResourceType::TXT,
            28 => DNSResourceType::AAAA,
            33 => DNSResourceType::SRV,
            43 => DNSResourceType::DS,
            44 => DNSResourceType::SSHFP,
            48 => DNSResourceType::DNSKEY,
            52 => DNSResourceType::TLSA,
            250 => DNSResourceType::TSIG,
            255 => DNSResourceType::ANY,
            257 => DNSResourceType::CAA,
            _ => DNSResourceType::Unknown,
        }
    }
}

impl From<DNSResourceType> for u16 {
    fn from(value: DNSResourceType) -> Self {
        match value {
            DNSResourceType::A => 1,
            DNSResourceType::NS => 2,
            DNSResourceType::CNAME => 5,
            DNSResourceType::SOA => 6,
            DNSResourceType::PTR => 12,
            DNSResourceType::HINFO => 13,
            DNSResourceType::MX => 15,
            DNSResourceType::TXT => 16,
            DNSResourceType::AAAA => 28,
            DNSResourceType::SRV => 33,
            DNSResourceType::DS => 43,
            DNSResourceType::SSHFP => 44,
            DNSResourceType::DNSKEY => 48,
            DNSResourceType::TLSA => 52,
            DNSResourceType::TSIG => 250,
            DNSResourceType::ANY => 255,
            DNSResourceType::CAA => 257,
            DNSResourceType::Unknown => 0,
        }
    }
}

impl DNSResourceType {
    /// Look up a type by its presentation-form mnemonic
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "A" => Some(DNSResourceType::A),
            "NS" => Some(DNSResourceType::NS),
            "CNAME" => Some(DNSResourceType::CNAME),
            "SOA" => Some(DNSResourceType::SOA),
            "PTR" => Some(DNSResourceType::PTR),
            "HINFO" => Some(DNSResourceType::HINFO),
            "MX" => Some(DNSResourceType::MX),
            "TXT" => Some(DNSResourceType::TXT),
            "AAAA" => Some(DNSResourceType::AAAA),
            "SRV" => Some(DNSResourceType::SRV),
            "DS" => Some(DNSResourceType::DS),
            "SSHFP" => Some(DNSResourceType::SSHFP),
            "DNSKEY" => Some(DNSResourceType::DNSKEY),
            "TLSA" => Some(DNSResourceType::TLSA),
            "TSIG" => Some(DNSResourceType::TSIG),
            "ANY" => Some(DNSResourceType::ANY),
            "CAA" => Some(DNSResourceType::CAA),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DNSResourceType::A => "A",
            DNSResourceType::NS => "NS",
            DNSResourceType::CNAME => "CNAME",
            DNSResourceType::SOA => "SOA",
            DNSResourceType::PTR => "PTR",
            DNSResourceType::HINFO => "HINFO",
            DNSResourceType::MX => "MX",
            DNSResourceType::TXT => "TXT",
            DNSResourceType::AAAA => "AAAA",
            DNSResourceType::SRV => "SRV",
            DNSResourceType::DS => "DS",
            DNSResourceType::SSHFP => "SSHFP",
            DNSResourceType::DNSKEY => "DNSKEY",
            DNSResourceType::TLSA => "TLSA",
            DNSResourceType::TSIG => "TSIG",
            DNSResourceType::ANY => "ANY",
            DNSResourceType::CAA => "CAA",
            DNSResourceType::Unknown => "TYPE0",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DNSResourceClass {
    #[default]
    Unknown,
    IN,
    CS,
    CH,
    HS,
    /// RFC 2136 "delete this RR" / prerequisite class
    NONE,
    /// RFC 2136 "delete RRset" / prerequisite class
    ANY,
}

impl From<u16> for DNSResourceClass {
    fn from(value: u16) -> Self {
        match value {
            1 => DNSResourceClass::IN,
            2 => DNSResourceClass::CS,
            3 => DNSResourceClass::CH,
            4 => DNSResourceClass::HS,
            254 => DNSResourceClass::NONE,
            255 => DNSResourceClass::ANY,
            _ => DNSResourceClass::Unknown,
        }
    }
}

impl From<DNSResourceClass> for u16 {
    fn from(value: DNSResourceClass) -> Self {
        match value {
            DNSResourceClass::IN => 1,
            DNSResourceClass::CS => 2,
            DNSResourceClass::CH => 3,
            DNSResourceClass::HS => 4,
            DNSResourceClass::NONE => 254,
            DNSResourceClass::ANY => 255,
            DNSResourceClass::Unknown => 0,
        }
    }
}

impl DNSResourceClass {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "IN" => Some(DNSResourceClass::IN),
            "CS" => Some(DNSResourceClass::CS),
            "CH" => Some(DNSResourceClass::CH),
            "HS" => Some(DNSResourceClass::HS),
            "NONE" => Some(DNSResourceClass::NONE),
            "ANY" => Some(DNSResourceClass::ANY),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DNSResourceClass::IN => "IN",
            DNSResourceClass::CS => "CS",
            DNSResourceClass::CH => "CH",
            DNSResourceClass::HS => "HS",
            DNSResourceClass::NONE => "NONE",
            DNSResourceClass::ANY => "ANY",
            DNSResourceClass::Unknown => "CLASS0",
        }
    }
}

/// DNS response codes, including the RFC 2136 and RFC 8945 additions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResponseCode {
    NoError = 0,
    FormatError = 1,
    ServerFailure = 2,
    NameError = 3, // NXDOMAIN
    NotImplemented = 4,
    Refused = 5,
    /// Name exists when it should not (RFC 2136)
    YXDomain = 6,
    /// RR set exists when it should not (RFC 2136)
    YXRRSet = 7,
    /// RR set that should exist does not (RFC 2136)
    NXRRSet = 8,
    /// Server is not authoritative for zone (RFC 2136)
    NotAuth = 9,
    /// Name not contained in zone (RFC 2136)
    NotZone = 10,
    /// TSIG signature failure (RFC 8945)
    BadSig = 16,
    /// TSIG key not recognized (RFC 8945)
    BadKey = 17,
    /// TSIG signature out of time window (RFC 8945)
    BadTime = 18,
}

impl ResponseCode {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            6 => ResponseCode::YXDomain,
            7 => ResponseCode::YXRRSet,
            8 => ResponseCode::NXRRSet,
            9 => ResponseCode::NotAuth,
            10 => ResponseCode::NotZone,
            16 => ResponseCode::BadSig,
            17 => ResponseCode::BadKey,
            18 => ResponseCode::BadTime,
            _ => ResponseCode::ServerFailure,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ResponseCode::NoError)
    }

    /// The mnemonic printed after each exchange
    pub fn name(self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormatError => "FORMERR",
            ResponseCode::ServerFailure => "SERVFAIL",
            ResponseCode::NameError => "NXDOMAIN",
            ResponseCode::NotImplemented => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            ResponseCode::BadSig => "BADSIG",
            ResponseCode::BadKey => "BADKEY",
            ResponseCode::BadTime => "BADTIME",
        }
    }
}
