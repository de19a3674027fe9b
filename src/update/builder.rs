use crate::client_error::{ClientError, Result};
use crate::constants::OPCODE_UPDATE;
use crate::dns::{DNSPacket, DNSQuestion};
use crate::update::context::UpdateContext;

/// Build the UPDATE query for the pending state: the zone goes into the
/// question, prerequisites into the answer section and update records
/// into the authority section. The caller supplies the message ID so
/// that previewing a query does not disturb the one actually sent.
pub fn build_query(ctx: &UpdateContext, id: u16) -> Result<DNSPacket> {
    let question = DNSQuestion::for_zone(&ctx.zone, ctx.class_num)
        .map_err(|_| ClientError::Build(format!("invalid zone name: {}", ctx.zone)))?;

    let mut packet = DNSPacket::default();
    packet.header.id = id;
    packet.header.opcode = OPCODE_UPDATE;
    packet.questions.push(question);

    packet.answers = ctx.prereq_list.clone();
    packet.authorities = ctx.update_list.clone();
    packet.update_counts();

    Ok(packet)
}
