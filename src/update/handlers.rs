use tracing::{debug, error, info};

use crate::client_error::{ClientError, Result};
use crate::dns::DNSPacket;
use crate::dns::common::dname_is_valid;
use crate::dns::enums::DNSResourceClass;
use crate::rr::{ParseFlags, parse_full, parse_partial};
use crate::transport;
use crate::update::builder::build_query;
use crate::update::context::{ServerInfo, UpdateContext};
use crate::update::directive::{COMMANDS, Directive, PREREQ_COMMANDS, find};
use crate::update::tsig::{self, TsigKey};

/// Execute one directive against the update context. The argument is
/// the residual line after the keyword, already trimmed.
pub async fn handle(directive: Directive, arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    debug!("handling {:?} with arg '{}'", directive, arg);

    match directive {
        Directive::Add => cmd_add(arg, ctx),
        Directive::Answer => cmd_answer(ctx),
        Directive::Class => cmd_class(arg, ctx),
        Directive::Debug => cmd_debug(ctx),
        Directive::Del => cmd_del(arg, ctx),
        Directive::Key => cmd_key(arg, ctx),
        Directive::Local => cmd_local(arg, ctx),
        Directive::NxDomain => cmd_nxdomain(arg, ctx),
        Directive::NxRrset => cmd_nxrrset(arg, ctx),
        Directive::Origin => cmd_origin(arg, ctx),
        Directive::Prereq => cmd_prereq(arg, ctx),
        Directive::Send => cmd_send(ctx).await,
        Directive::Server => cmd_server(arg, ctx),
        Directive::Show => cmd_show(ctx),
        Directive::Ttl => cmd_ttl(arg, ctx),
        Directive::Update => cmd_update(arg, ctx),
        Directive::YxDomain => cmd_yxdomain(arg, ctx),
        Directive::YxRrset => cmd_yxrrset(arg, ctx),
        Directive::Zone => cmd_zone(arg, ctx),
        Directive::GssTsig | Directive::OldGssTsig | Directive::Realm => {
            Err(ClientError::NotSupported)
        }
    }
}

fn parse_host(arg: &str, default_service: &str) -> Result<ServerInfo> {
    let mut fields = arg.split_ascii_whitespace();
    let host = fields
        .next()
        .ok_or_else(|| ClientError::Parse("missing address".to_string()))?;
    let service = fields.next().unwrap_or(default_service);
    Ok(ServerInfo::new(host, service))
}

fn cmd_server(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    let default_service = ctx.server.service.clone();
    ctx.server = parse_host(arg, &default_service)?;
    Ok(())
}

fn cmd_local(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    ctx.srcif = Some(parse_host(arg, "0")?);
    Ok(())
}

fn cmd_zone(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    if !dname_is_valid(arg) {
        return Err(ClientError::Parse(format!("failed to parse zone '{}'", arg)));
    }
    ctx.zone = arg.trim().to_string();
    Ok(())
}

fn cmd_origin(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    if !dname_is_valid(arg) {
        return Err(ClientError::Parse(format!("failed to parse zone '{}'", arg)));
    }
    ctx.set_origin(arg);
    Ok(())
}

fn cmd_class(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    let class = DNSResourceClass::from_name(arg.trim())
        .ok_or_else(|| ClientError::Parse(format!("failed to parse class '{}'", arg)))?;
    ctx.set_class(class);
    Ok(())
}

fn cmd_ttl(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    let ttl: u32 = arg
        .trim()
        .parse()
        .map_err(|_| ClientError::Parse(format!("failed to parse ttl '{}'", arg)))?;
    ctx.set_default_ttl(ttl);
    Ok(())
}

fn cmd_key(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    let Some((name, secret)) = arg.split_once(|c: char| c.is_ascii_whitespace()) else {
        return Err(ClientError::InvalidArgument(
            "command 'key' without secret specified".to_string(),
        ));
    };
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(ClientError::InvalidArgument(
            "command 'key' without secret specified".to_string(),
        ));
    }

    // Overrides any existing key
    let key = TsigKey::from_spec(&format!("{}:{}", name, secret))
        .map_err(|e| ClientError::InvalidArgument(e.to_string()))?;
    ctx.key = Some(key);
    Ok(())
}

fn cmd_debug(ctx: &mut UpdateContext) -> Result<()> {
    ctx.debug = true;
    info!("debug output enabled");
    Ok(())
}

fn cmd_add(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    parse_full(&mut ctx.scanner, arg)?;
    ctx.append_update();
    Ok(())
}

fn cmd_del(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    parse_partial(
        &mut ctx.scanner,
        arg,
        ParseFlags {
            no_default: true,
            ..Default::default()
        },
    )?;

    if ctx.scanner.owner.is_empty() {
        return Err(ClientError::Parse(format!(
            "failed to parse owner name '{}'",
            arg
        )));
    }

    // TTL is zero when deleting; whole-RRset deletes use class ANY
    ctx.scanner.ttl = 0;
    ctx.scanner.rclass = if ctx.scanner.rdata.is_empty() {
        DNSResourceClass::ANY
    } else {
        DNSResourceClass::NONE
    };

    ctx.append_update();
    Ok(())
}

fn cmd_update(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    // 'update' prefixes add|del|delete
    let Some((directive, rest)) = find(arg, COMMANDS) else {
        return Err(ClientError::Parse(format!("syntax error: '{}'", arg)));
    };

    match directive {
        Directive::Add => cmd_add(rest, ctx),
        Directive::Del => cmd_del(rest, ctx),
        _ => Err(ClientError::Parse(format!(
            "unexpected token '{}' after 'update', allowed: '{{add|del|delete}}'",
            arg
        ))),
    }
}

fn cmd_prereq(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    let Some((directive, rest)) = find(arg, PREREQ_COMMANDS) else {
        return Err(ClientError::Parse(format!("syntax error: '{}'", arg)));
    };

    match directive {
        Directive::NxDomain => cmd_nxdomain(rest, ctx),
        Directive::YxDomain => cmd_yxdomain(rest, ctx),
        Directive::NxRrset => cmd_nxrrset(rest, ctx),
        Directive::YxRrset => cmd_yxrrset(rest, ctx),
        _ => Err(ClientError::Parse(format!("syntax error: '{}'", arg))),
    }
}

fn cmd_nxdomain(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    parse_partial(
        &mut ctx.scanner,
        arg,
        ParseFlags {
            no_default: true,
            name_only: true,
            no_ttl: false,
        },
    )?;

    ctx.scanner.ttl = 0;
    ctx.scanner.rclass = DNSResourceClass::NONE;
    ctx.append_prereq();
    Ok(())
}

fn cmd_yxdomain(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    parse_partial(
        &mut ctx.scanner,
        arg,
        ParseFlags {
            no_default: true,
            name_only: true,
            no_ttl: false,
        },
    )?;

    ctx.scanner.ttl = 0;
    ctx.scanner.rclass = DNSResourceClass::ANY;
    ctx.append_prereq();
    Ok(())
}

fn cmd_nxrrset(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    parse_partial(
        &mut ctx.scanner,
        arg,
        ParseFlags {
            no_ttl: true,
            ..Default::default()
        },
    )?;

    if ctx.scanner.owner.is_empty() {
        return Err(ClientError::Parse(format!(
            "failed to parse prereq owner name '{}'",
            arg
        )));
    }

    ctx.scanner.ttl = 0;
    ctx.scanner.rclass = DNSResourceClass::NONE;
    ctx.append_prereq();
    Ok(())
}

fn cmd_yxrrset(arg: &str, ctx: &mut UpdateContext) -> Result<()> {
    parse_partial(
        &mut ctx.scanner,
        arg,
        ParseFlags {
            no_ttl: true,
            ..Default::default()
        },
    )?;

    if ctx.scanner.owner.is_empty() {
        return Err(ClientError::Parse(format!(
            "failed to parse prereq owner name '{}'",
            arg
        )));
    }

    ctx.scanner.ttl = 0;
    // Value-dependent existence checks carry class IN
    ctx.scanner.rclass = if ctx.scanner.rdata.is_empty() {
        DNSResourceClass::ANY
    } else {
        DNSResourceClass::IN
    };
    ctx.append_prereq();
    Ok(())
}

async fn cmd_send(ctx: &mut UpdateContext) -> Result<()> {
    let mut query = build_query(ctx, rand::random())?;

    // Sign if a key was specified
    let sign_ctx = match &ctx.key {
        Some(key) => Some(
            tsig::sign_packet(&mut query, key).map_err(|e| ClientError::Tsig(e.to_string()))?,
        ),
        None => None,
    };

    let wire = query
        .serialize()
        .map_err(|e| ClientError::Build(e.to_string()))?;
    if ctx.debug {
        debug!("update query ({} bytes): {}", wire.len(), hex::encode(&wire));
    }

    let answer_wire = transport::exchange(ctx, &wire).await?;
    if ctx.debug {
        debug!(
            "received answer ({} bytes): {}",
            answer_wire.len(),
            hex::encode(&answer_wire)
        );
    }

    let answer = DNSPacket::parse(&answer_wire)
        .map_err(|e| ClientError::Parse(format!("failed to parse response: {}", e)))?;

    // A TSIG failure on the answer is reported but the rcode is still
    // shown and the pending lists are committed.
    if let (Some(key), Some(sign_ctx)) = (&ctx.key, &sign_ctx) {
        if let Err(e) = tsig::verify_packet(&answer, key, sign_ctx) {
            error!("TSIG error with server: {}", e);
        }
    }

    let rcode = answer.rcode();
    println!(";; update response: {}", rcode.name());
    if !rcode.is_success() {
        error!("update failed: {}", rcode.name());
    }

    ctx.answer = Some(answer);
    ctx.reset();
    Ok(())
}

fn cmd_show(ctx: &mut UpdateContext) -> Result<()> {
    println!("Update query:");
    // Preview with a zero ID; the real ID is assigned on send
    let query = build_query(ctx, 0)?;
    println!("{}", query);
    Ok(())
}

fn cmd_answer(ctx: &mut UpdateContext) -> Result<()> {
    if let Some(answer) = &ctx.answer {
        println!("\nAnswer:");
        println!("{}", answer);
    }
    Ok(())
}
