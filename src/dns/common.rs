use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, Endianness};

use super::ParseError;
use crate::constants::{MAX_DNAME_WIRE_SIZE, MAX_LABEL_SIZE};

pub trait PacketComponent {
    fn write<E: Endianness>(
        &self,
        writer: &mut BitWriter<&mut Vec<u8>, E>,
    ) -> Result<(), ParseError>;
    fn read<E: Endianness>(&mut self, reader: &mut BitReader<&[u8], E>) -> Result<(), ParseError>;

    /// Read with access to the full packet buffer for compression support
    fn read_with_buffer<E: Endianness>(
        &mut self,
        reader: &mut BitReader<&[u8], E>,
        _packet_buf: &[u8],
    ) -> Result<(), ParseError> {
        self.read(reader)
    }

    fn read_labels<E: Endianness>(
        &mut self,
        reader: &mut BitReader<&[u8], E>,
    ) -> Result<Vec<String>, ParseError> {
        self.read_labels_with_buffer(reader, None)
    }

    fn read_labels_with_buffer<E: Endianness>(
        &mut self,
        reader: &mut BitReader<&[u8], E>,
        packet_buf: Option<&[u8]>,
    ) -> Result<Vec<String>, ParseError> {
        let mut labels = Vec::new();
        let mut label_count = 0;

        loop {
            let first_byte = reader.read_var::<u8>(8)?;

            if first_byte == 0 {
                break;
            }

            if (first_byte & 0xC0) == 0xC0 {
                // Compression pointer; resolvable only with the full packet
                let second_byte = reader.read_var::<u8>(8)?;
                let pointer = ((first_byte as u16 & 0x3F) << 8) | second_byte as u16;

                let Some(buf) = packet_buf else {
                    return Err(ParseError::InvalidLabel);
                };
                let (pointer_labels, _) = parse_domain_name(buf, pointer as usize)?;
                labels.extend(pointer_labels);
                break;
            }

            if first_byte > MAX_LABEL_SIZE as u8 {
                return Err(ParseError::InvalidLabel);
            }

            let mut label_buf = vec![0; first_byte as usize];
            reader.read_bytes(&mut label_buf)?;
            let label = String::from_utf8(label_buf).map_err(|_| ParseError::InvalidLabel)?;
            labels.push(label);

            label_count += 1;
            if label_count > 127 {
                return Err(ParseError::InvalidLabel);
            }
        }

        Ok(labels)
    }

    fn write_labels<E: Endianness>(
        &self,
        writer: &mut BitWriter<&mut Vec<u8>, E>,
        labels: &Vec<String>,
    ) -> Result<(), ParseError> {
        for label in labels {
            if label.is_empty() {
                continue;
            }
            if label.len() > MAX_LABEL_SIZE {
                return Err(ParseError::InvalidLabel);
            }
            writer.write_var::<u8>(8, label.len() as u8)?;
            writer.write_bytes(label.as_bytes())?;
        }

        // Root label terminator
        writer.write_var::<u8>(8, 0)?;

        Ok(())
    }
}

/// Parse a domain name at an absolute offset within a packet buffer,
/// following compression pointers. Returns the labels and the number of
/// bytes consumed at `start` (pointers count as two octets).
pub fn parse_domain_name(buf: &[u8], start: usize) -> Result<(Vec<String>, usize), ParseError> {
    let mut labels = Vec::new();
    let mut pos = start;
    let mut consumed = None;
    let mut jumps = 0;

    loop {
        let &len = buf.get(pos).ok_or(ParseError::InvalidLabel)?;

        if len == 0 {
            pos += 1;
            break;
        }

        if (len & 0xC0) == 0xC0 {
            let &low = buf.get(pos + 1).ok_or(ParseError::InvalidLabel)?;
            if consumed.is_none() {
                consumed = Some(pos + 2 - start);
            }
            pos = (((len as u16 & 0x3F) << 8) | low as u16) as usize;

            jumps += 1;
            if jumps > 16 {
                return Err(ParseError::InvalidLabel);
            }
            continue;
        }

        if len > MAX_LABEL_SIZE as u8 {
            return Err(ParseError::InvalidLabel);
        }

        let end = pos + 1 + len as usize;
        let bytes = buf.get(pos + 1..end).ok_or(ParseError::InvalidLabel)?;
        let label = String::from_utf8(bytes.to_vec()).map_err(|_| ParseError::InvalidLabel)?;
        labels.push(label);
        pos = end;
    }

    Ok((labels, consumed.unwrap_or(pos - start)))
}

/// Split a presentation-form domain name into lowercased labels, enforcing
/// RFC 1035 label and name size limits. The trailing root dot is accepted
/// and dropped; the root name itself yields an empty label vector.
pub fn name_to_labels(name: &str) -> Result<Vec<String>, ParseError> {
    let trimmed = name.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut labels = Vec::new();
    let mut wire_size = 1; // root terminator
    for label in trimmed.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_SIZE {
            return Err(ParseError::InvalidLabel);
        }
        wire_size += 1 + label.len();
        labels.push(label.to_lowercase());
    }

    if wire_size > MAX_DNAME_WIRE_SIZE {
        return Err(ParseError::NameTooLong);
    }

    Ok(labels)
}

/// Join labels back into an absolute presentation-form name.
pub fn labels_to_name(labels: &[String]) -> String {
    if labels.is_empty() {
        return ".".to_string();
    }
    let mut name = labels.join(".");
    name.push('.');
    name
}

/// Encode a presentation-form domain name into uncompressed wire format.
pub fn encode_dname(name: &str) -> Result<Vec<u8>, ParseError> {
    let labels = name_to_labels(name)?;
    let mut encoded = Vec::new();
    for label in &labels {
        encoded.push(label.len() as u8);
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    Ok(encoded)
}

/// Syntactic validity check for a presentation-form domain name.
pub fn dname_is_valid(name: &str) -> bool {
    name_to_labels(name).is_ok() && !name.trim().is_empty()
}
