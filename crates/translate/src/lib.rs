//! Turns parsed queries into store filters, and fetched records into result
//! tables.
pub mod errors;
pub mod filter;
pub mod query;
pub mod record;
pub mod table;
pub mod value;

pub use filter::{CompareOp, Filter};
pub use query::{Query, to_filter, translate_select};
pub use record::Record;
pub use table::{ResultTable, to_result_table};
pub use value::Value;
