use dnsup::dns::DNSPacket;
use dnsup::dns::enums::{DNSResourceClass, DNSResourceType};
use dnsup::interp::process_line;
use dnsup::update::build_query;
use dnsup::update::context::UpdateContext;

#[tokio::test]
async fn test_minimal_unsigned_add() {
    let mut ctx = UpdateContext::new();
    process_line("server 127.0.0.1 5354", &mut ctx).await.unwrap();
    process_line("zone example.com.", &mut ctx).await.unwrap();
    process_line("update add foo.example.com. 60 IN A 192.0.2.1", &mut ctx)
        .await
        .unwrap();

    let packet = build_query(&ctx, 0x1000).unwrap();

    assert_eq!(packet.header.opcode, 5);
    assert_eq!(packet.header.qdcount, 1);
    assert_eq!(packet.header.ancount, 0);
    assert_eq!(packet.header.nscount, 1);
    assert_eq!(packet.header.arcount, 0);

    let question = &packet.questions[0];
    assert_eq!(question.labels, vec!["example", "com"]);
    assert_eq!(question.qclass, DNSResourceClass::IN);
    assert_eq!(question.qtype, DNSResourceType::SOA);

    let rr = &packet.authorities[0];
    assert_eq!(rr.rtype, DNSResourceType::A);
    assert_eq!(rr.ttl, 60);
    assert_eq!(rr.rdata, vec![192, 0, 2, 1]);
}

#[tokio::test]
async fn test_prereq_and_delete_sections() {
    let mut ctx = UpdateContext::new();
    process_line("zone example.com.", &mut ctx).await.unwrap();
    process_line("prereq yxrrset foo.example.com. A", &mut ctx)
        .await
        .unwrap();
    process_line("update delete foo.example.com. A", &mut ctx)
        .await
        .unwrap();

    let packet = build_query(&ctx, 1).unwrap();

    assert_eq!(packet.header.ancount, 1);
    assert_eq!(packet.header.nscount, 1);

    let prereq = &packet.answers[0];
    assert_eq!(prereq.rclass, DNSResourceClass::ANY);
    assert_eq!(prereq.rtype, DNSResourceType::A);
    assert_eq!(prereq.ttl, 0);
    assert!(prereq.rdata.is_empty());

    let update = &packet.authorities[0];
    assert_eq!(update.rclass, DNSResourceClass::ANY);
    assert_eq!(update.rtype, DNSResourceType::A);
    assert_eq!(update.ttl, 0);
    assert!(update.rdata.is_empty());
}

#[tokio::test]
async fn test_query_wire_roundtrip() {
    let mut ctx = UpdateContext::new();
    process_line("zone example.com.", &mut ctx).await.unwrap();
    process_line("update add foo.example.com. 60 IN A 192.0.2.1", &mut ctx)
        .await
        .unwrap();
    process_line("update add foo.example.com. 60 IN TXT \"hello\"", &mut ctx)
        .await
        .unwrap();

    let packet = build_query(&ctx, 0xBEEF).unwrap();
    let wire = packet.serialize().unwrap();
    let parsed = DNSPacket::parse(&wire).unwrap();

    assert_eq!(parsed, packet);
}

#[tokio::test]
async fn test_no_name_compression_in_query() {
    let mut ctx = UpdateContext::new();
    process_line("zone example.com.", &mut ctx).await.unwrap();
    process_line("update add foo.example.com. 60 IN A 192.0.2.1", &mut ctx)
        .await
        .unwrap();
    process_line("update add foo.example.com. 60 IN A 192.0.2.2", &mut ctx)
        .await
        .unwrap();

    let wire = build_query(&ctx, 2).unwrap().serialize().unwrap();

    // Both update owners appear in full; nothing points back into the message
    let needle = b"\x03foo\x07example\x03com\x00";
    let hits = wire
        .windows(needle.len())
        .filter(|window| window == needle)
        .count();
    assert_eq!(hits, 2);
}

#[tokio::test]
async fn test_maximum_length_owner_roundtrip() {
    // Four labels totalling 255 octets in wire form
    let owner = format!(
        "{}.{}.{}.{}.",
        "a".repeat(63),
        "b".repeat(63),
        "c".repeat(63),
        "d".repeat(61)
    );

    let mut ctx = UpdateContext::new();
    process_line("zone example.com.", &mut ctx).await.unwrap();
    process_line(&format!("update add {} 60 IN A 192.0.2.9", owner), &mut ctx)
        .await
        .unwrap();

    let packet = build_query(&ctx, 3).unwrap();
    let wire = packet.serialize().unwrap();
    let parsed = DNSPacket::parse(&wire).unwrap();

    assert_eq!(parsed.authorities[0].labels, packet.authorities[0].labels);
    assert_eq!(parsed.authorities[0].labels.len(), 4);
}

#[tokio::test]
async fn test_oversized_owner_rejected() {
    let owner = format!(
        "{}.{}.{}.{}.",
        "a".repeat(63),
        "b".repeat(63),
        "c".repeat(63),
        "d".repeat(63)
    );

    let mut ctx = UpdateContext::new();
    process_line("zone example.com.", &mut ctx).await.unwrap();

    let result = process_line(&format!("update add {} 60 IN A 192.0.2.9", owner), &mut ctx).await;
    assert!(result.is_err());
    assert!(ctx.update_list.is_empty());
}
