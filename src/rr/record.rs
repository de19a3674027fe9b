use crate::client_error::{ClientError, Result};
use crate::dns::common::encode_dname;
use crate::dns::enums::DNSResourceType;

/// Complete a presentation-form name against an origin if it is relative.
pub fn normalize_name(name: &str, origin: &str) -> String {
    let name = name.trim();
    if name == "@" || name.is_empty() {
        origin.to_string()
    } else if name.ends_with('.') {
        name.to_string()
    } else if origin == "." {
        format!("{}.", name)
    } else {
        format!("{}.{}", name, origin.trim_start_matches('.'))
    }
}

/// Encode presentation-form rdata into wire bytes for the supported types.
/// Embedded domain names are completed against `origin` when relative.
pub fn encode_rdata(rtype: DNSResourceType, text: &str, origin: &str) -> Result<Vec<u8>> {
    match rtype {
        DNSResourceType::A => encode_a(text),
        DNSResourceType::AAAA => encode_aaaa(text),
        DNSResourceType::NS | DNSResourceType::CNAME | DNSResourceType::PTR => {
            encode_name_field(text, origin)
        }
        DNSResourceType::SOA => encode_soa(text, origin),
        DNSResourceType::MX => encode_mx(text, origin),
        DNSResourceType::TXT => Ok(encode_txt(text)),
        DNSResourceType::SRV => encode_srv(text, origin),
        DNSResourceType::CAA => encode_caa(text),
        _ => Err(ClientError::Parse(format!(
            "unsupported record type: {}",
            rtype.name()
        ))),
    }
}

fn encode_a(text: &str) -> Result<Vec<u8>> {
    let addr: std::net::Ipv4Addr = text
        .trim()
        .parse()
        .map_err(|_| ClientError::Parse(format!("invalid IPv4 address: {}", text)))?;
    Ok(addr.octets().to_vec())
}

fn encode_aaaa(text: &str) -> Result<Vec<u8>> {
    let addr: std::net::Ipv6Addr = text
        .trim()
        .parse()
        .map_err(|_| ClientError::Parse(format!("invalid IPv6 address: {}", text)))?;
    Ok(addr.octets().to_vec())
}

fn encode_name_field(text: &str, origin: &str) -> Result<Vec<u8>> {
    let name = normalize_name(text, origin);
    encode_dname(&name).map_err(|_| ClientError::Parse(format!("invalid domain name: {}", text)))
}

fn encode_soa(text: &str, origin: &str) -> Result<Vec<u8>> {
    // mname rname serial refresh retry expire minimum
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 7 {
        return Err(ClientError::Parse(format!(
            "SOA record requires 7 fields, got {}",
            parts.len()
        )));
    }

    let mut rdata = encode_name_field(parts[0], origin)?;
    rdata.extend_from_slice(&encode_name_field(parts[1], origin)?);

    for part in parts.iter().skip(2) {
        let value: u32 = part
            .parse()
            .map_err(|_| ClientError::Parse(format!("invalid SOA numeric value: {}", part)))?;
        rdata.extend_from_slice(&value.to_be_bytes());
    }

    Ok(rdata)
}

fn encode_mx(text: &str, origin: &str) -> Result<Vec<u8>> {
    // preference exchange
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(ClientError::Parse(format!(
            "MX record requires 2 fields, got {}",
            parts.len()
        )));
    }

    let preference: u16 = parts[0]
        .parse()
        .map_err(|_| ClientError::Parse(format!("invalid MX preference: {}", parts[0])))?;

    let mut rdata = preference.to_be_bytes().to_vec();
    rdata.extend_from_slice(&encode_name_field(parts[1], origin)?);
    Ok(rdata)
}

fn encode_txt(text: &str) -> Vec<u8> {
    let text = text.trim().trim_matches('"');

    let mut rdata = Vec::new();
    for chunk in text.as_bytes().chunks(255) {
        rdata.push(chunk.len() as u8);
        rdata.extend_from_slice(chunk);
    }
    if rdata.is_empty() {
        rdata.push(0);
    }
    rdata
}

fn encode_srv(text: &str, origin: &str) -> Result<Vec<u8>> {
    // priority weight port target
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(ClientError::Parse(format!(
            "SRV record requires 4 fields, got {}",
            parts.len()
        )));
    }

    let mut rdata = Vec::new();
    for part in &parts[..3] {
        let value: u16 = part
            .parse()
            .map_err(|_| ClientError::Parse(format!("invalid SRV numeric value: {}", part)))?;
        rdata.extend_from_slice(&value.to_be_bytes());
    }
    rdata.extend_from_slice(&encode_name_field(parts[3], origin)?);
    Ok(rdata)
}

fn encode_caa(text: &str) -> Result<Vec<u8>> {
    // flags tag value
    let parts: Vec<&str> = text.splitn(3, ' ').collect();
    if parts.len() != 3 {
        return Err(ClientError::Parse(format!(
            "CAA record requires 3 fields, got {}",
            parts.len()
        )));
    }

    let flags: u8 = parts[0]
        .parse()
        .map_err(|_| ClientError::Parse(format!("invalid CAA flags: {}", parts[0])))?;

    let mut rdata = vec![flags];
    let tag = parts[1];
    rdata.push(tag.len() as u8);
    rdata.extend_from_slice(tag.as_bytes());
    rdata.extend_from_slice(parts[2].trim_matches('"').as_bytes());
    Ok(rdata)
}

/// Parse a TTL value, allowing the usual s/m/h/d/w time suffixes.
pub fn parse_ttl(s: &str) -> Result<u32> {
    let s = s.to_lowercase();
    let err = || ClientError::Parse(format!("invalid TTL value: {}", s));

    if let Some(num) = s.strip_suffix('s') {
        num.parse().map_err(|_| err())
    } else if let Some(num) = s.strip_suffix('m') {
        num.parse::<u32>().map(|n| n * 60).map_err(|_| err())
    } else if let Some(num) = s.strip_suffix('h') {
        num.parse::<u32>().map(|n| n * 3600).map_err(|_| err())
    } else if let Some(num) = s.strip_suffix('d') {
        num.parse::<u32>().map(|n| n * 86400).map_err(|_| err())
    } else if let Some(num) = s.strip_suffix('w') {
        num.parse::<u32>().map(|n| n * 604800).map_err(|_| err())
    } else {
        s.parse().map_err(|_| err())
    }
}
