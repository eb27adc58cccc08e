//! MySQL protocol gateway answering simple SELECT statements from a document
//! store.
pub mod args;
pub mod server;
