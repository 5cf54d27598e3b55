// Listener module
// Builds the bound TCP socket the accept loop runs on

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

const LISTEN_BACKLOG: i32 = 128;

/// Bind a non-blocking `TcpListener` on `addr` with `SO_REUSEADDR` set.
///
/// `SO_REUSEADDR` lets the service rebind its port while connections from a
/// previous run are still in TIME_WAIT, so a quick restart does not fail
/// with "address in use".
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    // Tokio requires the fd to be non-blocking before adoption
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    TcpListener::from_std(socket.into())
}
