//! One-shot DNS message exchange over UDP or TCP. Sockets live for a
//! single attempt and are torn down before returning.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpSocket, TcpStream, UdpSocket, lookup_host};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::client_error::{ClientError, Result};
use crate::constants::{MAX_TCP_PACKET_SIZE, MAX_UDP_PACKET_SIZE};
use crate::update::context::{IpFamily, Protocol, ServerInfo, UpdateContext};

fn family_matches(addr: &SocketAddr, family: IpFamily) -> bool {
    match family {
        IpFamily::Any => true,
        IpFamily::V4 => addr.is_ipv4(),
        IpFamily::V6 => addr.is_ipv6(),
    }
}

async fn resolve(endpoint: &ServerInfo, family: IpFamily) -> Result<SocketAddr> {
    let port: u16 = endpoint.service.parse().map_err(|_| {
        ClientError::InvalidArgument(format!("invalid port '{}'", endpoint.service))
    })?;

    let addrs = lookup_host((endpoint.host.as_str(), port)).await?;
    addrs
        .into_iter()
        .find(|addr| family_matches(addr, family))
        .ok_or_else(|| {
            ClientError::InvalidArgument(format!("could not resolve '{}'", endpoint.host))
        })
}

async fn udp_exchange(
    server: SocketAddr,
    srcif: Option<SocketAddr>,
    wire: &[u8],
) -> Result<Vec<u8>> {
    let local = srcif.unwrap_or_else(|| match server {
        SocketAddr::V4(_) => "0.0.0.0:0".parse().unwrap(),
        SocketAddr::V6(_) => "[::]:0".parse().unwrap(),
    });

    let socket = UdpSocket::bind(local).await?;
    socket.connect(server).await?;
    socket.send(wire).await?;

    let mut buf = vec![0u8; MAX_TCP_PACKET_SIZE];
    let received = socket.recv(&mut buf).await?;
    buf.truncate(received);
    Ok(buf)
}

async fn tcp_exchange(
    server: SocketAddr,
    srcif: Option<SocketAddr>,
    wire: &[u8],
) -> Result<Vec<u8>> {
    let mut stream = match srcif {
        Some(local) => {
            let socket = if server.is_ipv4() {
                TcpSocket::new_v4()?
            } else {
                TcpSocket::new_v6()?
            };
            socket.bind(local)?;
            socket.connect(server).await?
        }
        None => TcpStream::connect(server).await?,
    };

    // Length-prefixed framing per RFC 1035
    stream.write_all(&(wire.len() as u16).to_be_bytes()).await?;
    stream.write_all(wire).await?;
    stream.flush().await?;

    let mut length_buf = [0u8; 2];
    stream.read_exact(&mut length_buf).await?;
    let response_length = u16::from_be_bytes(length_buf) as usize;

    let mut buf = vec![0u8; response_length];
    stream.read_exact(&mut buf).await?;
    Ok(buf)
}

/// Send the wire message to the configured server and wait for a reply,
/// retrying failed attempts up to the configured bound.
pub async fn exchange(ctx: &UpdateContext, wire: &[u8]) -> Result<Vec<u8>> {
    let server = resolve(&ctx.server, ctx.ip).await?;
    let srcif = match &ctx.srcif {
        Some(endpoint) => Some(
            resolve(
                endpoint,
                if server.is_ipv4() {
                    IpFamily::V4
                } else {
                    IpFamily::V6
                },
            )
            .await?,
        ),
        None => None,
    };

    // Messages too large for a UDP payload go over TCP
    let use_tcp = ctx.protocol == Protocol::Tcp || wire.len() > MAX_UDP_PACKET_SIZE;

    let attempts = 1 + ctx.retries;
    for attempt in 1..=attempts {
        debug!(
            "sending {} bytes to {} via {} (attempt {}/{})",
            wire.len(),
            server,
            if use_tcp { "TCP" } else { "UDP" },
            attempt,
            attempts
        );

        let exchange = async {
            if use_tcp {
                tcp_exchange(server, srcif, wire).await
            } else {
                udp_exchange(server, srcif, wire).await
            }
        };

        match timeout(ctx.wait, exchange).await {
            Ok(Ok(answer)) => return Ok(answer),
            Ok(Err(e)) => warn!("exchange with {} failed: {}", server, e),
            Err(_) => warn!("exchange with {} timed out", server),
        }
    }

    Err(ClientError::ConnectionRefused(attempts))
}
