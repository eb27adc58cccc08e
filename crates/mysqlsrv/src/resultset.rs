use crate::messages::{
    BackendMessage, EofPacket, FieldDescriptor, ResultSetHeader, RowPacket,
};
use translate::ResultTable;

/// Messages making up a text result set: the column count, one descriptor
/// per column, an EOF, one packet per row, and a final EOF.
pub fn result_set_messages(
    table_name: &str,
    table: &ResultTable,
    status: u16,
) -> Vec<BackendMessage> {
    let mut msgs = Vec::with_capacity(table.num_columns() + table.num_rows() + 3);
    let eof = EofPacket {
        warnings: 0,
        status,
    };

    msgs.push(BackendMessage::ResultSetHeader(ResultSetHeader {
        column_count: table.num_columns() as u64,
    }));
    msgs.extend(
        table
            .columns
            .iter()
            .map(|col| BackendMessage::Field(FieldDescriptor::text(table_name, col))),
    );
    msgs.push(BackendMessage::Eof(eof));
    msgs.extend(table.rows.iter().map(|row| {
        BackendMessage::Row(RowPacket {
            values: row.iter().map(|v| v.to_string()).collect(),
        })
    }));
    msgs.push(BackendMessage::Eof(eof));

    msgs
}
