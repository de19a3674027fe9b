use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, Endianness};

use super::{
    ParseError,
    common::{PacketComponent, labels_to_name, name_to_labels},
    enums::{DNSResourceClass, DNSResourceType},
};

/// The single zone entry of an UPDATE message (question section in a query)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DNSQuestion {
    pub labels: Vec<String>,
    pub qtype: DNSResourceType,
    pub qclass: DNSResourceClass,
}

impl DNSQuestion {
    /// Build the zone entry for an UPDATE query. The type is always SOA
    /// per RFC 2136.
    pub fn for_zone(zone: &str, qclass: DNSResourceClass) -> Result<Self, ParseError> {
        Ok(Self {
            labels: name_to_labels(zone)?,
            qtype: DNSResourceType::SOA,
            qclass,
        })
    }

    /// Owner name in presentation form
    pub fn name(&self) -> String {
        labels_to_name(&self.labels)
    }

    fn read_from<E: Endianness>(
        &mut self,
        reader: &mut BitReader<&[u8], E>,
        packet_buf: Option<&[u8]>,
    ) -> Result<(), ParseError> {
        self.labels = self.read_labels_with_buffer(reader, packet_buf)?;
        self.qtype = DNSResourceType::from(reader.read_var::<u16>(16)?);
        self.qclass = DNSResourceClass::from(reader.read_var::<u16>(16)?);
        Ok(())
    }
}

impl PacketComponent for DNSQuestion {
    fn write<E: Endianness>(
        &self,
        writer: &mut BitWriter<&mut Vec<u8>, E>,
    ) -> Result<(), ParseError> {
        self.write_labels(writer, &self.labels)?;
        writer.write_var::<u16>(16, u16::from(self.qtype))?;
        writer.write_var::<u16>(16, u16::from(self.qclass))?;
        Ok(())
    }

    fn read<E: Endianness>(&mut self, reader: &mut BitReader<&[u8], E>) -> Result<(), ParseError> {
        self.read_from(reader, None)
    }

    fn read_with_buffer<E: Endianness>(
        &mut self,
        reader: &mut BitReader<&[u8], E>,
        packet_buf: &[u8],
    ) -> Result<(), ParseError> {
        self.read_from(reader, Some(packet_buf))
    }
}
