use crate::record::{ID_FIELD, Record};
use crate::value::Value;
use parser::statement::Projection;

/// Columns and rows ready to be sent to a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Shape fetched records into a result table.
///
/// A wildcard projection takes its columns from the first record, skipping
/// the identifier field. With no records there is nothing to derive columns
/// from, and the table has no columns. Fields missing from a record are null.
pub fn to_result_table(records: &[Record], projection: &Projection) -> ResultTable {
    let columns: Vec<String> = match projection {
        Projection::Wildcard => match records.first() {
            Some(first) => first
                .fields()
                .filter(|f| *f != ID_FIELD)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        },
        Projection::Columns(cols) => cols.clone(),
    };

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| record.get(col).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    ResultTable { columns, rows }
}
