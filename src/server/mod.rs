// Server module entry point
// TCP listener setup, connection handling, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

pub use connection::accept_connection;
pub use listener::create_listener;
pub use signal::spawn_shutdown_listener;
