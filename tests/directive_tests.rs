use dnsup::client_error::ClientError;
use dnsup::dns::enums::{DNSResourceClass, DNSResourceType};
use dnsup::interp::process_line;
use dnsup::update::context::UpdateContext;

async fn session() -> UpdateContext {
    let mut ctx = UpdateContext::new();
    process_line("zone example.com.", &mut ctx).await.unwrap();
    process_line("origin example.com.", &mut ctx)
        .await
        .unwrap();
    ctx
}

#[tokio::test]
async fn test_add_appends_to_update_list() {
    let mut ctx = session().await;

    process_line("update add foo.example.com. 60 IN A 192.0.2.1", &mut ctx)
        .await
        .unwrap();

    assert_eq!(ctx.update_list.len(), 1);
    let rr = &ctx.update_list[0];
    assert_eq!(rr.labels, vec!["foo", "example", "com"]);
    assert_eq!(rr.rtype, DNSResourceType::A);
    assert_eq!(rr.rclass, DNSResourceClass::IN);
    assert_eq!(rr.ttl, 60);
    assert_eq!(rr.rdata, vec![192, 0, 2, 1]);
}

#[tokio::test]
async fn test_add_completes_relative_owner() {
    let mut ctx = session().await;

    process_line("add bar 60 IN A 192.0.2.2", &mut ctx)
        .await
        .unwrap();

    assert_eq!(ctx.update_list[0].labels, vec!["bar", "example", "com"]);
}

#[tokio::test]
async fn test_delete_whole_rrset_uses_class_any() {
    let mut ctx = session().await;

    process_line("update delete foo.example.com. A", &mut ctx)
        .await
        .unwrap();

    let rr = &ctx.update_list[0];
    assert_eq!(rr.rclass, DNSResourceClass::ANY);
    assert_eq!(rr.rtype, DNSResourceType::A);
    assert_eq!(rr.ttl, 0);
    assert!(rr.rdata.is_empty());
}

#[tokio::test]
async fn test_delete_specific_rr_uses_class_none() {
    let mut ctx = session().await;

    process_line("del foo.example.com. A 192.0.2.1", &mut ctx)
        .await
        .unwrap();

    let rr = &ctx.update_list[0];
    assert_eq!(rr.rclass, DNSResourceClass::NONE);
    assert_eq!(rr.ttl, 0);
    assert_eq!(rr.rdata, vec![192, 0, 2, 1]);
}

#[tokio::test]
async fn test_delete_whole_name() {
    let mut ctx = session().await;

    process_line("del foo.example.com.", &mut ctx).await.unwrap();

    let rr = &ctx.update_list[0];
    assert_eq!(rr.rtype, DNSResourceType::ANY);
    assert_eq!(rr.rclass, DNSResourceClass::ANY);
    assert!(rr.rdata.is_empty());
}

#[tokio::test]
async fn test_prereq_classes() {
    let mut ctx = session().await;

    process_line("prereq nxdomain gone.example.com.", &mut ctx)
        .await
        .unwrap();
    process_line("prereq yxdomain here.example.com.", &mut ctx)
        .await
        .unwrap();
    process_line("prereq nxrrset gone.example.com. TXT", &mut ctx)
        .await
        .unwrap();
    process_line("prereq yxrrset here.example.com. A", &mut ctx)
        .await
        .unwrap();
    process_line("prereq yxrrset here.example.com. A 192.0.2.1", &mut ctx)
        .await
        .unwrap();

    assert_eq!(ctx.prereq_list.len(), 5);
    for rr in &ctx.prereq_list {
        assert_eq!(rr.ttl, 0);
    }

    assert_eq!(ctx.prereq_list[0].rclass, DNSResourceClass::NONE);
    assert_eq!(ctx.prereq_list[0].rtype, DNSResourceType::ANY);
    assert_eq!(ctx.prereq_list[1].rclass, DNSResourceClass::ANY);
    assert_eq!(ctx.prereq_list[1].rtype, DNSResourceType::ANY);
    assert_eq!(ctx.prereq_list[2].rclass, DNSResourceClass::NONE);
    assert_eq!(ctx.prereq_list[2].rtype, DNSResourceType::TXT);
    assert_eq!(ctx.prereq_list[3].rclass, DNSResourceClass::ANY);
    assert!(ctx.prereq_list[3].rdata.is_empty());
    assert_eq!(ctx.prereq_list[4].rclass, DNSResourceClass::IN);
    assert_eq!(ctx.prereq_list[4].rdata, vec![192, 0, 2, 1]);
}

#[tokio::test]
async fn test_class_mismatch_leaves_context_unchanged() {
    let mut ctx = session().await;
    process_line("class CH", &mut ctx).await.unwrap();

    let result = process_line("update add foo. 60 IN A 192.0.2.1", &mut ctx).await;

    assert!(matches!(result, Err(ClientError::Parse(_))));
    assert!(ctx.update_list.is_empty());
    assert!(ctx.prereq_list.is_empty());
}

#[tokio::test]
async fn test_unsupported_directives() {
    let mut ctx = session().await;

    for line in ["gsstsig", "oldgsstsig", "realm EXAMPLE.COM"] {
        let result = process_line(line, &mut ctx).await;
        assert!(matches!(result, Err(ClientError::NotSupported)), "{}", line);
    }
}

#[tokio::test]
async fn test_key_requires_secret() {
    let mut ctx = session().await;

    let result = process_line("key testkey", &mut ctx).await;
    assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
    assert!(ctx.key.is_none());

    process_line("key testkey dGhlIHNlY3JldA==", &mut ctx)
        .await
        .unwrap();
    let key = ctx.key.as_ref().unwrap();
    assert_eq!(key.name, "testkey");

    // A later key replaces the earlier one
    process_line("key hmac-sha512:other dGhlIHNlY3JldA==", &mut ctx)
        .await
        .unwrap();
    assert_eq!(ctx.key.as_ref().unwrap().name, "other");
}

#[tokio::test]
async fn test_ttl_directive() {
    let mut ctx = session().await;

    process_line("ttl 300", &mut ctx).await.unwrap();
    assert_eq!(ctx.scanner.default_ttl, 300);

    assert!(process_line("ttl -5", &mut ctx).await.is_err());
    assert!(process_line("ttl soon", &mut ctx).await.is_err());
    assert_eq!(ctx.scanner.default_ttl, 300);
}

#[tokio::test]
async fn test_server_port_defaulting() {
    let mut ctx = session().await;

    process_line("server 192.0.2.53", &mut ctx).await.unwrap();
    assert_eq!(ctx.server.host, "192.0.2.53");
    assert_eq!(ctx.server.service, "53");

    process_line("server 192.0.2.54 5353", &mut ctx).await.unwrap();
    assert_eq!(ctx.server.service, "5353");

    // Default port preserves the previous service
    process_line("server 192.0.2.55", &mut ctx).await.unwrap();
    assert_eq!(ctx.server.service, "5353");

    process_line("local 192.0.2.1", &mut ctx).await.unwrap();
    let srcif = ctx.srcif.as_ref().unwrap();
    assert_eq!(srcif.host, "192.0.2.1");
    assert_eq!(srcif.service, "0");
}

#[tokio::test]
async fn test_update_rejects_other_tokens() {
    let mut ctx = session().await;

    let result = process_line("update zone example.com.", &mut ctx).await;
    assert!(matches!(result, Err(ClientError::Parse(_))));
    assert!(ctx.update_list.is_empty());
}

#[tokio::test]
async fn test_zone_validation() {
    let mut ctx = session().await;

    assert!(process_line("zone bad..name.", &mut ctx).await.is_err());
    assert_eq!(ctx.zone, "example.com.");
}

#[tokio::test]
async fn test_unknown_directive_is_syntax_error() {
    let mut ctx = session().await;

    assert!(process_line("frobnicate all the things", &mut ctx).await.is_err());
    assert!(ctx.update_list.is_empty());
}
