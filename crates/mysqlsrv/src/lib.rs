//! Server side of the MySQL client/server protocol, answering queries from a
//! record store.
pub mod codec;
pub mod errors;
pub mod handler;
pub mod messages;
pub mod resultset;

pub use handler::{DEFAULT_SERVER_VERSION, HandlerConfig, ProtocolHandler};
