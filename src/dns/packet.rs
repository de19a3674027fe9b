use std::fmt;

use bitstream_io::{BigEndian, BitReader, BitWriter};

use super::{
    DNSHeader, DNSQuestion, DNSResource, ParseError,
    common::{PacketComponent, labels_to_name},
    enums::ResponseCode,
};
use crate::constants::OPCODE_UPDATE;

/// A full DNS message. For the UPDATE opcode the answer section carries
/// prerequisites and the authority section carries update records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DNSPacket {
    pub header: DNSHeader,
    pub questions: Vec<DNSQuestion>,
    pub answers: Vec<DNSResource>,
    pub authorities: Vec<DNSResource>,
    pub additionals: Vec<DNSResource>,
}

impl DNSPacket {
    pub fn update_counts(&mut self) {
        self.header.qdcount = self.questions.len() as u16;
        self.header.ancount = self.answers.len() as u16;
        self.header.nscount = self.authorities.len() as u16;
        self.header.arcount = self.additionals.len() as u16;
    }

    pub fn serialize(&self) -> Result<Vec<u8>, ParseError> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf)?;
        Ok(buf)
    }

    /// Serialize without name compression; every owner is written in full.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) -> Result<(), ParseError> {
        let mut writer = BitWriter::<_, BigEndian>::new(buf);

        self.header.write(&mut writer)?;
        for question in &self.questions {
            question.write(&mut writer)?;
        }
        for answer in &self.answers {
            answer.write(&mut writer)?;
        }
        for authority in &self.authorities {
            authority.write(&mut writer)?;
        }
        for additional in &self.additionals {
            additional.write(&mut writer)?;
        }

        Ok(())
    }

    pub fn parse(buf: &[u8]) -> Result<Self, ParseError> {
        let mut reader = BitReader::<_, BigEndian>::new(buf);

        let mut header = DNSHeader::default();
        header.read(&mut reader).map_err(|_| ParseError::InvalidHeader)?;

        let mut questions = Vec::new();
        for _ in 0..header.qdcount {
            let mut question = DNSQuestion::default();
            question
                .read_with_buffer(&mut reader, buf)
                .map_err(|_| ParseError::InvalidQuestionSection)?;
            questions.push(question);
        }

        let mut answers = Vec::new();
        for _ in 0..header.ancount {
            let mut rr = DNSResource::default();
            rr.read_with_buffer(&mut reader, buf)
                .map_err(|_| ParseError::InvalidAnswerSection)?;
            answers.push(rr);
        }

        let mut authorities = Vec::new();
        for _ in 0..header.nscount {
            let mut rr = DNSResource::default();
            rr.read_with_buffer(&mut reader, buf)
                .map_err(|_| ParseError::InvalidAuthoritySection)?;
            authorities.push(rr);
        }

        let mut additionals = Vec::new();
        for _ in 0..header.arcount {
            let mut rr = DNSResource::default();
            rr.read_with_buffer(&mut reader, buf)
                .map_err(|_| ParseError::InvalidAdditionalSection)?;
            additionals.push(rr);
        }

        Ok(DNSPacket {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    pub fn rcode(&self) -> ResponseCode {
        ResponseCode::from_u8(self.header.rcode)
    }

    fn opcode_name(&self) -> &'static str {
        match self.header.opcode {
            0 => "QUERY",
            4 => "NOTIFY",
            OPCODE_UPDATE => "UPDATE",
            _ => "RESERVED",
        }
    }
}

fn write_rr_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    records: &[DNSResource],
) -> fmt::Result {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(f, ";; {} SECTION:", title)?;
    for rr in records {
        writeln!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            rr.owner(),
            rr.ttl,
            rr.rclass.name(),
            rr.rtype.name(),
            rr.rdata_string()
        )?;
    }
    Ok(())
}

impl fmt::Display for DNSPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let update = self.header.opcode == OPCODE_UPDATE;

        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}; status: {}; id: {}",
            self.opcode_name(),
            self.rcode().name(),
            self.header.id
        )?;
        writeln!(
            f,
            ";; {}: {}; {}: {}; {}: {}; ADDITIONAL: {}",
            if update { "ZONE" } else { "QUERY" },
            self.header.qdcount,
            if update { "PREREQ" } else { "ANSWER" },
            self.header.ancount,
            if update { "UPDATE" } else { "AUTHORITY" },
            self.header.nscount,
            self.header.arcount
        )?;

        if !self.questions.is_empty() {
            writeln!(f, ";; {} SECTION:", if update { "ZONE" } else { "QUESTION" })?;
            for question in &self.questions {
                writeln!(
                    f,
                    ";{}\t{}\t{}",
                    labels_to_name(&question.labels),
                    question.qclass.name(),
                    question.qtype.name()
                )?;
            }
        }

        write_rr_section(f, if update { "PREREQUISITE" } else { "ANSWER" }, &self.answers)?;
        write_rr_section(f, if update { "UPDATE" } else { "AUTHORITY" }, &self.authorities)?;
        write_rr_section(f, "ADDITIONAL", &self.additionals)?;

        Ok(())
    }
}
