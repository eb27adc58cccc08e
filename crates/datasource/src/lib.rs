//! Record stores queries are answered from.
pub mod errors;
pub mod memory;
pub mod mongodb;

use async_trait::async_trait;
use errors::Result;
use translate::{Filter, Record};

/// Fetch the records of a table that match a filter.
///
/// Implementations are shared between all sessions and must accept
/// concurrent calls.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, table: &str, filter: &Filter) -> Result<Vec<Record>>;
}
