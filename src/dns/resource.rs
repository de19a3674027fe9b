use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, Endianness};

use super::{
    ParseError,
    common::{PacketComponent, labels_to_name, parse_domain_name},
    enums::{DNSResourceClass, DNSResourceType},
};

/// A resource record carried in any section of a DNS message.
/// Rdata is kept as raw wire bytes; presentation form is derived on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DNSResource {
    pub labels: Vec<String>,
    pub rtype: DNSResourceType,
    pub rclass: DNSResourceClass,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata: Vec<u8>,
}

impl DNSResource {
    /// Owner name in presentation form
    pub fn owner(&self) -> String {
        labels_to_name(&self.labels)
    }

    /// Best-effort presentation form of the rdata. Record types whose
    /// rdata embeds compressed names fall back to a hex dump.
    pub fn rdata_string(&self) -> String {
        if self.rdata.is_empty() {
            return String::new();
        }

        match self.rtype {
            DNSResourceType::A if self.rdata.len() == 4 => {
                let octets: [u8; 4] = self.rdata[..4].try_into().unwrap();
                std::net::Ipv4Addr::from(octets).to_string()
            }
            DNSResourceType::AAAA if self.rdata.len() == 16 => {
                let octets: [u8; 16] = self.rdata[..16].try_into().unwrap();
                std::net::Ipv6Addr::from(octets).to_string()
            }
            DNSResourceType::NS | DNSResourceType::CNAME | DNSResourceType::PTR => {
                match parse_domain_name(&self.rdata, 0) {
                    Ok((labels, _)) => labels_to_name(&labels),
                    Err(_) => hex::encode(&self.rdata),
                }
            }
            DNSResourceType::MX if self.rdata.len() > 2 => {
                let preference = u16::from_be_bytes([self.rdata[0], self.rdata[1]]);
                match parse_domain_name(&self.rdata[2..], 0) {
                    Ok((labels, _)) => format!("{} {}", preference, labels_to_name(&labels)),
                    Err(_) => hex::encode(&self.rdata),
                }
            }
            DNSResourceType::TXT => {
                let mut strings = Vec::new();
                let mut pos = 0;
                while pos < self.rdata.len() {
                    let len = self.rdata[pos] as usize;
                    let Some(bytes) = self.rdata.get(pos + 1..pos + 1 + len) else {
                        return hex::encode(&self.rdata);
                    };
                    strings.push(format!("\"{}\"", String::from_utf8_lossy(bytes)));
                    pos += 1 + len;
                }
                strings.join(" ")
            }
            DNSResourceType::SOA => match self.soa_string() {
                Some(s) => s,
                None => hex::encode(&self.rdata),
            },
            _ => hex::encode(&self.rdata),
        }
    }

    fn soa_string(&self) -> Option<String> {
        let (mname, used) = parse_domain_name(&self.rdata, 0).ok()?;
        let (rname, used2) = parse_domain_name(&self.rdata, used).ok()?;
        let rest = self.rdata.get(used + used2..)?;
        if rest.len() != 20 {
            return None;
        }
        let mut fields = Vec::new();
        for chunk in rest.chunks(4) {
            fields.push(u32::from_be_bytes(chunk.try_into().unwrap()).to_string());
        }
        Some(format!(
            "{} {} {}",
            labels_to_name(&mname),
            labels_to_name(&rname),
            fields.join(" ")
        ))
    }
}

impl PacketComponent for DNSResource {
    fn write<E: Endianness>(
        &self,
        writer: &mut BitWriter<&mut Vec<u8>, E>,
    ) -> Result<(), ParseError> {
        self.write_labels(writer, &self.labels)?;
        writer.write_var::<u16>(16, self.rtype.into())?;
        writer.write_var::<u16>(16, self.rclass.into())?;
        writer.write_var::<u32>(32, self.ttl)?;
        writer.write_var::<u16>(16, self.rdata.len() as u16)?;
        writer.write_bytes(&self.rdata)?;
        Ok(())
    }

    fn read<E: Endianness>(&mut self, reader: &mut BitReader<&[u8], E>) -> Result<(), ParseError> {
        let labels = self.read_labels(reader)?;
        self.finish_read(labels, reader)
    }

    fn read_with_buffer<E: Endianness>(
        &mut self,
        reader: &mut BitReader<&[u8], E>,
        packet_buf: &[u8],
    ) -> Result<(), ParseError> {
        let labels = self.read_labels_with_buffer(reader, Some(packet_buf))?;
        self.finish_read(labels, reader)
    }
}

impl DNSResource {
    fn finish_read<E: Endianness>(
        &mut self,
        labels: Vec<String>,
        reader: &mut BitReader<&[u8], E>,
    ) -> Result<(), ParseError> {
        let rtype = reader.read_var::<u16>(16)?.into();
        let rclass = reader.read_var::<u16>(16)?.into();
        let ttl = reader.read_var::<u32>(32)?;
        let rdlength = reader.read_var::<u16>(16)?;
        let mut rdata = vec![0; rdlength as usize];
        reader.read_bytes(&mut rdata)?;

        *self = DNSResource {
            labels,
            rtype,
            rclass,
            ttl,
            rdlength,
            rdata,
        };
        Ok(())
    }
}
