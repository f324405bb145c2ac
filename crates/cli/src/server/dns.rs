use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use zonegate_infrastructure::dns::DnsServerHandler;

const MAX_DATAGRAM: usize = 4096;

/// Serves DNS over UDP until ctrl-c or `shutdown` fires.
///
/// Each datagram is handled on its own task so a slow upstream exchange
/// never stalls the receive loop.
pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket = Arc::new(UdpSocket::bind(socket_addr).await?);

    info!(bind_address = %socket.local_addr()?, "DNS server listening on UDP");

    let mut recv_buf = vec![0u8; MAX_DATAGRAM];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS server: shutdown requested");
                break;
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = %e, "Failed to listen for ctrl-c");
                }
                info!("DNS server: interrupt received, shutting down");
                break;
            }
            received = socket.recv_from(&mut recv_buf) => {
                match received {
                    Ok((n, from)) => {
                        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                        let handler = handler.clone();
                        let socket = socket.clone();
                        tokio::spawn(async move {
                            if let Some(response) = handler.handle_raw(&query, from.ip()).await {
                                if let Err(e) = socket.send_to(&response, from).await {
                                    debug!(client = %from, error = %e, "Failed to send DNS response");
                                }
                            }
                        });
                    }
                    Err(e) if is_transient(&e) => {
                        debug!(error = %e, "Transient UDP receive error");
                    }
                    Err(e) => {
                        error!(error = %e, "UDP receive error");
                        return Err(e.into());
                    }
                }
            }
        }
    }

    Ok(())
}

// ICMP port-unreachable from a previous send surfaces here on some platforms.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset | io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}
