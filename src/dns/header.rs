use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, Endianness};

use super::{ParseError, common::PacketComponent};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DNSHeader {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    /// Zone count in an UPDATE message
    pub qdcount: u16,
    /// Prerequisite count in an UPDATE message
    pub ancount: u16,
    /// Update count in an UPDATE message
    pub nscount: u16,
    pub arcount: u16,
}

impl DNSHeader {
    /// Pack the QR/opcode/AA/TC/RD/RA/Z/RCODE bits into the second
    /// 16-bit word of the header.
    fn pack_flags(&self) -> u16 {
        let mut flags = (self.qr as u16) << 15;
        flags |= ((self.opcode & 0x0F) as u16) << 11;
        flags |= (self.aa as u16) << 10;
        flags |= (self.tc as u16) << 9;
        flags |= (self.rd as u16) << 8;
        flags |= (self.ra as u16) << 7;
        flags |= ((self.z & 0x07) as u16) << 4;
        flags |= (self.rcode & 0x0F) as u16;
        flags
    }

    fn unpack_flags(&mut self, flags: u16) {
        self.qr = flags & 0x8000 != 0;
        self.opcode = ((flags >> 11) & 0x0F) as u8;
        self.aa = flags & 0x0400 != 0;
        self.tc = flags & 0x0200 != 0;
        self.rd = flags & 0x0100 != 0;
        self.ra = flags & 0x0080 != 0;
        self.z = ((flags >> 4) & 0x07) as u8;
        self.rcode = (flags & 0x000F) as u8;
    }
}

impl PacketComponent for DNSHeader {
    fn write<E: Endianness>(
        &self,
        writer: &mut BitWriter<&mut Vec<u8>, E>,
    ) -> Result<(), ParseError> {
        writer.write_var::<u16>(16, self.id)?;
        writer.write_var::<u16>(16, self.pack_flags())?;
        for count in [self.qdcount, self.ancount, self.nscount, self.arcount] {
            writer.write_var::<u16>(16, count)?;
        }
        Ok(())
    }

    fn read<E: Endianness>(&mut self, reader: &mut BitReader<&[u8], E>) -> Result<(), ParseError> {
        self.id = reader.read_var::<u16>(16)?;
        let flags = reader.read_var::<u16>(16)?;
        self.unpack_flags(flags);
        self.qdcount = reader.read_var::<u16>(16)?;
        self.ancount = reader.read_var::<u16>(16)?;
        self.nscount = reader.read_var::<u16>(16)?;
        self.arcount = reader.read_var::<u16>(16)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream_io::BigEndian;
    use crate::constants::OPCODE_UPDATE;

    #[test]
    fn test_flag_word_packing() {
        let mut header = DNSHeader::default();
        header.opcode = OPCODE_UPDATE;
        // opcode 5 sits in bits 11-14
        assert_eq!(header.pack_flags(), 0x2800);

        header.qr = true;
        header.rcode = 5;
        assert_eq!(header.pack_flags(), 0xA805);

        let mut decoded = DNSHeader::default();
        decoded.unpack_flags(0xA805);
        assert!(decoded.qr);
        assert_eq!(decoded.opcode, OPCODE_UPDATE);
        assert_eq!(decoded.rcode, 5);
    }

    #[test]
    fn test_header_wire_roundtrip() {
        let original = DNSHeader {
            id: 0x1234,
            qr: true,
            opcode: OPCODE_UPDATE,
            aa: true,
            tc: false,
            rd: true,
            ra: false,
            z: 0,
            rcode: 9,
            qdcount: 1,
            ancount: 2,
            nscount: 3,
            arcount: 4,
        };

        let mut buffer = Vec::new();
        {
            let mut writer = BitWriter::<_, BigEndian>::new(&mut buffer);
            original.write(&mut writer).expect("write failed");
        }
        assert_eq!(buffer.len(), 12);

        let mut reader = BitReader::<_, BigEndian>::new(&buffer[..]);
        let mut parsed = DNSHeader::default();
        parsed.read(&mut reader).expect("read failed");

        assert_eq!(parsed, original);
    }
}
