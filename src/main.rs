use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use dnsup::interp;
use dnsup::update::context::{IpFamily, Protocol, UpdateContext};
use dnsup::update::tsig::TsigKey;

/// Interactive DNS dynamic update client (RFC 2136) with TSIG support
#[derive(Parser, Debug)]
#[command(name = "dnsup", version, about)]
struct Args {
    /// Input files with update directives ('-' reads standard input)
    files: Vec<String>,

    /// Default server port
    #[arg(short = 'p', long, default_value_t = 53)]
    port: u16,

    /// Timeout for each send attempt in seconds
    #[arg(short = 't', long, default_value_t = 10)]
    timeout: u64,

    /// Additional send attempts after the first
    #[arg(short = 'r', long, default_value_t = 2)]
    retries: u32,

    /// Always use TCP instead of UDP
    #[arg(short = 'v', long)]
    tcp: bool,

    /// TSIG key as [algorithm:]name:secret (secret base64)
    #[arg(short = 'y', long, value_name = "[ALG:]NAME:SECRET")]
    key: Option<String>,

    /// Use IPv4 endpoints only
    #[arg(short = '4', conflicts_with = "ipv6")]
    ipv4: bool,

    /// Use IPv6 endpoints only
    #[arg(short = '6')]
    ipv6: bool,

    /// Enable debug output
    #[arg(short = 'd', long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn context_from_args(args: &Args) -> Result<UpdateContext, String> {
    let mut ctx = UpdateContext::new();

    ctx.server.service = args.port.to_string();
    ctx.wait = std::time::Duration::from_secs(args.timeout);
    ctx.retries = args.retries;
    ctx.debug = args.debug;

    if args.tcp {
        ctx.protocol = Protocol::Tcp;
    }
    if args.ipv4 {
        ctx.ip = IpFamily::V4;
    } else if args.ipv6 {
        ctx.ip = IpFamily::V6;
    }

    if let Some(spec) = &args.key {
        let key = TsigKey::from_spec(spec).map_err(|e| e.to_string())?;
        ctx.key = Some(key);
    }

    Ok(ctx)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    let mut ctx = match context_from_args(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("invalid arguments: {}", e);
            std::process::exit(2);
        }
    };

    if args.files.is_empty() {
        if interp::process_stdin(&mut ctx).await.is_err() {
            std::process::exit(1);
        }
        return;
    }

    for file in &args.files {
        let result = if file == "-" {
            interp::process_stdin(&mut ctx).await
        } else {
            interp::process_file(file, &mut ctx).await
        };

        if result.is_err() {
            std::process::exit(1);
        }
    }
}
