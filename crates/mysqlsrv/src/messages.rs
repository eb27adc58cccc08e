//! Payload layouts of the packets exchanged with clients.
//!
//! All integers are little-endian. Names and values use length-encoded
//! strings, which for anything shorter than 251 bytes is a single length
//! byte followed by the bytes.

use crate::codec::{BufStringMut, Cursor, decode_latin1, encode_latin1};
use crate::errors::{FrameError, MysqlSrvError};
use bytes::{Buf, BufMut, BytesMut};

pub const PROTOCOL_VERSION: u8 = 10;

/// Length of the scramble sent in the greeting.
pub const SALT_LEN: usize = 20;

/// Everything a 4.1 server announces except compression and SSL.
pub const DEFAULT_CAPABILITIES: u16 = 0xF7FF & !((CLIENT_COMPRESS | CLIENT_SSL) as u16);

/// latin1_swedish_ci
pub const CHARSET_LATIN1: u8 = 8;

pub const SERVER_STATUS_AUTOCOMMIT: u16 = 0x0002;

pub const CLIENT_CONNECT_WITH_DB: u32 = 0x0008;
pub const CLIENT_COMPRESS: u32 = 0x0020;
pub const CLIENT_PROTOCOL_41: u32 = 0x0200;
pub const CLIENT_SSL: u32 = 0x0800;
pub const CLIENT_SECURE_CONNECTION: u32 = 0x8000;

/// Column type used for every column, everything is sent as text.
pub const MYSQL_TYPE_STRING: u8 = 0xFE;

const OK_HEADER: u8 = 0x00;
const EOF_HEADER: u8 = 0xFE;

/// A payload that can be written to and read from a packet.
pub trait Payload: Sized {
    fn encode(&self, dst: &mut BytesMut);
    fn decode(src: &[u8]) -> Result<Self, FrameError>;
}

/// Initial handshake sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub protocol_version: u8,
    pub server_version: String,
    pub connection_id: u32,
    pub salt: [u8; SALT_LEN],
    pub capabilities: u16,
    pub charset: u8,
    pub status: u16,
}

impl Greeting {
    /// Create a greeting with a freshly generated salt.
    pub fn new(
        server_version: impl Into<String>,
        connection_id: u32,
        capabilities: u16,
        charset: u8,
        status: u16,
    ) -> Result<Greeting, MysqlSrvError> {
        Ok(Greeting {
            protocol_version: PROTOCOL_VERSION,
            server_version: server_version.into(),
            connection_id,
            salt: generate_salt()?,
            capabilities,
            charset,
            status,
        })
    }
}

/// Random printable salt. Clients read the salt halves as strings, so no
/// byte may be zero.
pub fn generate_salt() -> Result<[u8; SALT_LEN], MysqlSrvError> {
    let mut salt = [0; SALT_LEN];
    getrandom::fill(&mut salt).map_err(MysqlSrvError::Salt)?;
    for b in salt.iter_mut() {
        *b = *b % 94 + 33;
    }
    Ok(salt)
}

impl Payload for Greeting {
    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(self.protocol_version);
        dst.put_cstring(&self.server_version);
        dst.put_u32_le(self.connection_id);
        dst.put_slice(&self.salt[..8]);
        dst.put_u8(0);
        dst.put_u16_le(self.capabilities);
        dst.put_u8(self.charset);
        dst.put_u16_le(self.status);
        dst.put_bytes(0, 13);
        dst.put_slice(&self.salt[8..]);
        dst.put_u8(0);
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        let protocol_version = buf.read_u8()?;
        let server_version = buf.read_cstring()?;
        let connection_id = buf.read_u32()?;
        let mut salt = [0; SALT_LEN];
        salt[..8].copy_from_slice(buf.read_bytes(8)?);
        buf.skip(1)?;
        let capabilities = buf.read_u16()?;
        let charset = buf.read_u8()?;
        let status = buf.read_u16()?;
        buf.skip(13)?;
        salt[8..].copy_from_slice(buf.read_bytes(SALT_LEN - 8)?);
        buf.skip(1)?;

        Ok(Greeting {
            protocol_version,
            server_version,
            connection_id,
            salt,
            capabilities,
            charset,
            status,
        })
    }
}

/// The client's handshake response (protocol 4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub capabilities: u32,
    pub max_packet_size: u32,
    pub charset: u8,
    pub username: String,
    pub auth_response: Vec<u8>,
    pub database: Option<String>,
}

impl Payload for LoginRequest {
    fn encode(&self, dst: &mut BytesMut) {
        let mut capabilities = self.capabilities | CLIENT_PROTOCOL_41 | CLIENT_SECURE_CONNECTION;
        if self.database.is_some() {
            capabilities |= CLIENT_CONNECT_WITH_DB;
        }
        dst.put_u32_le(capabilities);
        dst.put_u32_le(self.max_packet_size);
        dst.put_u8(self.charset);
        dst.put_bytes(0, 23);
        dst.put_cstring(&self.username);
        // The secure connection layout has a one byte length.
        let auth_len = self.auth_response.len().min(u8::MAX as usize);
        dst.put_u8(auth_len as u8);
        dst.put_slice(&self.auth_response[..auth_len]);
        if let Some(database) = &self.database {
            dst.put_cstring(database);
        }
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        let capabilities = buf.read_u32()?;
        if capabilities & CLIENT_PROTOCOL_41 == 0 {
            return Err(FrameError::Malformed("pre-4.1 login request"));
        }
        let max_packet_size = buf.read_u32()?;
        let charset = buf.read_u8()?;
        buf.skip(23)?;
        let username = buf.read_cstring()?;
        let auth_response = if capabilities & CLIENT_SECURE_CONNECTION != 0 {
            let len = buf.read_u8()? as usize;
            buf.read_bytes(len)?.to_vec()
        } else {
            buf.read_cstring_bytes()?.to_vec()
        };
        let database = if capabilities & CLIENT_CONNECT_WITH_DB != 0 && buf.has_remaining() {
            Some(buf.read_cstring()?)
        } else {
            None
        };

        Ok(LoginRequest {
            capabilities,
            max_packet_size,
            charset,
            username,
            auth_response,
            database,
        })
    }
}

/// Command codes sent as the first byte of a command packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandCode {
    Sleep = 0x00,
    Quit = 0x01,
    InitDb = 0x02,
    Query = 0x03,
    FieldList = 0x04,
    CreateDb = 0x05,
    DropDb = 0x06,
    Refresh = 0x07,
    Shutdown = 0x08,
    Statistics = 0x09,
    ProcessInfo = 0x0A,
    Connect = 0x0B,
    ProcessKill = 0x0C,
    Debug = 0x0D,
    Ping = 0x0E,
}

impl TryFrom<u8> for CommandCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0x00 => CommandCode::Sleep,
            0x01 => CommandCode::Quit,
            0x02 => CommandCode::InitDb,
            0x03 => CommandCode::Query,
            0x04 => CommandCode::FieldList,
            0x05 => CommandCode::CreateDb,
            0x06 => CommandCode::DropDb,
            0x07 => CommandCode::Refresh,
            0x08 => CommandCode::Shutdown,
            0x09 => CommandCode::Statistics,
            0x0A => CommandCode::ProcessInfo,
            0x0B => CommandCode::Connect,
            0x0C => CommandCode::ProcessKill,
            0x0D => CommandCode::Debug,
            0x0E => CommandCode::Ping,
            other => return Err(other),
        })
    }
}

/// A command from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Change the default schema.
    InitDb(String),
    Query(String),
    Ping,
    /// Any command that isn't handled. `code` may not be a known command.
    Other { code: u8, body: Vec<u8> },
}

impl Command {
    pub fn code(&self) -> u8 {
        match self {
            Command::Quit => CommandCode::Quit as u8,
            Command::InitDb(_) => CommandCode::InitDb as u8,
            Command::Query(_) => CommandCode::Query as u8,
            Command::Ping => CommandCode::Ping as u8,
            Command::Other { code, .. } => *code,
        }
    }
}

impl Payload for Command {
    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(self.code());
        match self {
            Command::InitDb(s) | Command::Query(s) => dst.put_slice(&encode_latin1(s)),
            Command::Other { body, .. } => dst.put_slice(body),
            Command::Quit | Command::Ping => (),
        }
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        let code = buf.read_u8()?;
        let body = buf.read_rest();
        // Statement text is not null terminated, it runs to the end of the
        // payload.
        let text = || decode_latin1(body);

        Ok(match CommandCode::try_from(code) {
            Ok(CommandCode::Quit) => Command::Quit,
            Ok(CommandCode::InitDb) => Command::InitDb(text()),
            Ok(CommandCode::Query) => Command::Query(text()),
            Ok(CommandCode::Ping) => Command::Ping,
            _ => Command::Other {
                code,
                body: body.to_vec(),
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OkPacket {
    pub affected_rows: u64,
    pub last_insert_id: u64,
    pub status: u16,
    pub warnings: u16,
}

impl Payload for OkPacket {
    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(OK_HEADER);
        dst.put_lenenc_int(self.affected_rows);
        dst.put_lenenc_int(self.last_insert_id);
        dst.put_u16_le(self.status);
        dst.put_u16_le(self.warnings);
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        if buf.read_u8()? != OK_HEADER {
            return Err(FrameError::Malformed("not an OK packet"));
        }
        Ok(OkPacket {
            affected_rows: buf.read_lenenc_int()?,
            last_insert_id: buf.read_lenenc_int()?,
            status: buf.read_u16()?,
            warnings: buf.read_u16()?,
        })
    }
}

/// First packet of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSetHeader {
    pub column_count: u64,
}

impl Payload for ResultSetHeader {
    fn encode(&self, dst: &mut BytesMut) {
        dst.put_lenenc_int(self.column_count);
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        Ok(ResultSetHeader {
            column_count: buf.read_lenenc_int()?,
        })
    }
}

/// Column metadata (protocol 4.1 layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub catalog: String,
    pub database: String,
    pub table: String,
    pub org_table: String,
    pub name: String,
    pub org_name: String,
    pub charset: u16,
    pub column_length: u32,
    pub column_type: u8,
    pub flags: u16,
    pub decimals: u8,
}

impl FieldDescriptor {
    /// A text column of `table`.
    pub fn text(table: &str, name: &str) -> FieldDescriptor {
        FieldDescriptor {
            catalog: "def".to_string(),
            database: String::new(),
            table: table.to_string(),
            org_table: table.to_string(),
            name: name.to_string(),
            org_name: name.to_string(),
            charset: CHARSET_LATIN1 as u16,
            column_length: 255,
            column_type: MYSQL_TYPE_STRING,
            flags: 0,
            decimals: 0,
        }
    }
}

/// Length of the fixed fields following the names.
const FIELD_FIXED_LEN: u8 = 0x0C;

impl Payload for FieldDescriptor {
    fn encode(&self, dst: &mut BytesMut) {
        dst.put_lenenc_str(&self.catalog);
        dst.put_lenenc_str(&self.database);
        dst.put_lenenc_str(&self.table);
        dst.put_lenenc_str(&self.org_table);
        dst.put_lenenc_str(&self.name);
        dst.put_lenenc_str(&self.org_name);
        dst.put_u8(FIELD_FIXED_LEN);
        dst.put_u16_le(self.charset);
        dst.put_u32_le(self.column_length);
        dst.put_u8(self.column_type);
        dst.put_u16_le(self.flags);
        dst.put_u8(self.decimals);
        dst.put_bytes(0, 2);
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        let catalog = buf.read_lenenc_str()?;
        let database = buf.read_lenenc_str()?;
        let table = buf.read_lenenc_str()?;
        let org_table = buf.read_lenenc_str()?;
        let name = buf.read_lenenc_str()?;
        let org_name = buf.read_lenenc_str()?;
        if buf.read_u8()? != FIELD_FIXED_LEN {
            return Err(FrameError::Malformed("unexpected field descriptor length"));
        }
        let field = FieldDescriptor {
            catalog,
            database,
            table,
            org_table,
            name,
            org_name,
            charset: buf.read_u16()?,
            column_length: buf.read_u32()?,
            column_type: buf.read_u8()?,
            flags: buf.read_u16()?,
            decimals: buf.read_u8()?,
        };
        buf.skip(2)?;
        Ok(field)
    }
}

/// Ends the column definitions and the rows of a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EofPacket {
    pub warnings: u16,
    pub status: u16,
}

impl Payload for EofPacket {
    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(EOF_HEADER);
        dst.put_u16_le(self.warnings);
        dst.put_u16_le(self.status);
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        if buf.read_u8()? != EOF_HEADER {
            return Err(FrameError::Malformed("not an EOF packet"));
        }
        Ok(EofPacket {
            warnings: buf.read_u16()?,
            status: buf.read_u16()?,
        })
    }
}

/// A result row. Every value is sent as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPacket {
    pub values: Vec<String>,
}

impl Payload for RowPacket {
    fn encode(&self, dst: &mut BytesMut) {
        for value in &self.values {
            dst.put_lenenc_str(value);
        }
    }

    fn decode(src: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Cursor::new(src);
        let mut values = Vec::new();
        while buf.has_remaining() {
            values.push(buf.read_lenenc_str()?);
        }
        Ok(RowPacket { values })
    }
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMessage {
    Greeting(Greeting),
    Ok(OkPacket),
    ResultSetHeader(ResultSetHeader),
    Field(FieldDescriptor),
    Eof(EofPacket),
    Row(RowPacket),
}

impl BackendMessage {
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            BackendMessage::Greeting(msg) => msg.encode(dst),
            BackendMessage::Ok(msg) => msg.encode(dst),
            BackendMessage::ResultSetHeader(msg) => msg.encode(dst),
            BackendMessage::Field(msg) => msg.encode(dst),
            BackendMessage::Eof(msg) => msg.encode(dst),
            BackendMessage::Row(msg) => msg.encode(dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn round_trip<P: Payload + PartialEq + std::fmt::Debug>(msg: &P) -> P {
        let mut buf = BytesMut::new();
        msg.encode(&mut buf);
        P::decode(&buf).unwrap()
    }

    fn encoded(msg: BackendMessage) -> Vec<u8> {
        let mut buf = BytesMut::new();
        msg.encode(&mut buf);
        buf.to_vec()
    }

    #[test]
    fn greeting_layout() {
        let greeting = Greeting {
            protocol_version: PROTOCOL_VERSION,
            server_version: "5.1".to_string(),
            connection_id: 1,
            salt: *b"abcdefghijklmnopqrst",
            capabilities: DEFAULT_CAPABILITIES,
            charset: CHARSET_LATIN1,
            status: SERVER_STATUS_AUTOCOMMIT,
        };
        let mut expected = vec![10, b'5', b'.', b'1', 0, 1, 0, 0, 0];
        expected.extend_from_slice(b"abcdefgh");
        expected.extend_from_slice(&[0, 0xDF, 0xF7, 8, 2, 0]);
        expected.extend_from_slice(&[0; 13]);
        expected.extend_from_slice(b"ijklmnopqrst");
        expected.push(0);

        assert_eq!(expected, encoded(BackendMessage::Greeting(greeting)));
        assert_eq!(0, DEFAULT_CAPABILITIES as u32 & CLIENT_COMPRESS);
        assert_eq!(0, DEFAULT_CAPABILITIES as u32 & CLIENT_SSL);
    }

    #[test]
    fn salt_is_printable() {
        let salt = generate_salt().unwrap();
        assert!(salt.iter().all(|b| (33..127).contains(b)));
    }

    #[test]
    fn ok_layout() {
        let ok = OkPacket {
            affected_rows: 0,
            last_insert_id: 0,
            status: SERVER_STATUS_AUTOCOMMIT,
            warnings: 0,
        };
        assert_eq!(vec![0, 0, 0, 2, 0, 0, 0], encoded(BackendMessage::Ok(ok)));
    }

    #[test]
    fn eof_layout() {
        let eof = EofPacket {
            warnings: 0,
            status: SERVER_STATUS_AUTOCOMMIT,
        };
        assert_eq!(vec![0xFE, 0, 0, 2, 0], encoded(BackendMessage::Eof(eof)));
    }

    #[test]
    fn field_layout() {
        let field = FieldDescriptor::text("t", "ab");
        let mut expected = vec![3, b'd', b'e', b'f', 0, 1, b't', 1, b't', 2, b'a', b'b', 2, b'a', b'b'];
        expected.extend_from_slice(&[0x0C, 8, 0, 255, 0, 0, 0, 0xFE, 0, 0, 0, 0, 0]);
        assert_eq!(expected, encoded(BackendMessage::Field(field)));
    }

    #[test]
    fn row_layout() {
        let row = RowPacket {
            values: vec!["Jon".to_string(), String::new()],
        };
        assert_eq!(
            vec![3, b'J', b'o', b'n', 0],
            encoded(BackendMessage::Row(row))
        );
    }

    #[test]
    fn commands() {
        assert_eq!(
            Command::Query("SELECT 1".to_string()),
            Command::decode(b"\x03SELECT 1").unwrap()
        );
        assert_eq!(Command::Quit, Command::decode(&[0x01]).unwrap());
        assert_eq!(Command::Ping, Command::decode(&[0x0E]).unwrap());
        assert_eq!(
            Command::InitDb("people".to_string()),
            Command::decode(b"\x02people").unwrap()
        );
        assert_eq!(
            Command::Other {
                code: 0x16,
                body: vec![1, 2]
            },
            Command::decode(&[0x16, 1, 2]).unwrap()
        );
        assert!(Command::decode(&[]).is_err());
    }

    #[test]
    fn login_without_database() {
        let login = LoginRequest {
            capabilities: CLIENT_PROTOCOL_41 | CLIENT_SECURE_CONNECTION,
            max_packet_size: 1 << 24,
            charset: 33,
            username: "root".to_string(),
            auth_response: vec![],
            database: None,
        };
        assert_eq!(login, round_trip(&login));
    }

    #[test]
    fn long_auth_responses_are_clamped() {
        let login = LoginRequest {
            capabilities: CLIENT_PROTOCOL_41 | CLIENT_SECURE_CONNECTION,
            max_packet_size: 1 << 24,
            charset: 8,
            username: "root".to_string(),
            auth_response: vec![7; 300],
            database: Some("test".to_string()),
        };
        let decoded = round_trip(&login);
        assert_eq!(vec![7; 255], decoded.auth_response);
        assert_eq!(Some("test".to_string()), decoded.database);
    }

    #[test]
    fn statement_text_is_latin1() {
        assert_eq!(
            Command::Query("SELECT * FROM people WHERE name = 'José'".to_string()),
            Command::decode(b"\x03SELECT * FROM people WHERE name = 'Jos\xE9'").unwrap()
        );

        let mut buf = BytesMut::new();
        Command::Query("'Zoë'".to_string()).encode(&mut buf);
        assert_eq!(&b"\x03'Zo\xEB'"[..], &buf[..]);
    }

    #[test]
    fn login_rejects_old_protocol() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(0);
        buf.put_bytes(0, 28);
        assert!(LoginRequest::decode(&buf).is_err());
    }

    #[test]
    fn wrong_headers() {
        assert!(OkPacket::decode(&[0xFE, 0, 0, 0, 0]).is_err());
        assert!(EofPacket::decode(&[0x00, 0, 0, 0, 0]).is_err());
        assert!(FieldDescriptor::decode(&[0, 0, 0, 0, 0, 0, 0x0B]).is_err());
    }

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_ ]{0,300}"
    }

    proptest! {
        #[test]
        fn greeting_round_trip(
            server_version in "[a-zA-Z0-9.-]{0,40}",
            connection_id in any::<u32>(),
            salt in any::<[u8; SALT_LEN]>(),
            capabilities in any::<u16>(),
            charset in any::<u8>(),
            status in any::<u16>(),
        ) {
            let greeting = Greeting {
                protocol_version: PROTOCOL_VERSION,
                server_version,
                connection_id,
                salt,
                capabilities,
                charset,
                status,
            };
            prop_assert_eq!(&greeting, &round_trip(&greeting));
        }

        #[test]
        fn login_round_trip(
            capabilities in any::<u32>(),
            max_packet_size in any::<u32>(),
            charset in any::<u8>(),
            username in "[a-z_]{0,16}",
            auth_response in proptest::collection::vec(any::<u8>(), 0..=20),
            database in proptest::option::of("[a-z_]{1,16}"),
        ) {
            let mut capabilities = capabilities | CLIENT_PROTOCOL_41 | CLIENT_SECURE_CONNECTION;
            if database.is_some() {
                capabilities |= CLIENT_CONNECT_WITH_DB;
            } else {
                capabilities &= !CLIENT_CONNECT_WITH_DB;
            }
            let login = LoginRequest {
                capabilities,
                max_packet_size,
                charset,
                username,
                auth_response,
                database,
            };
            prop_assert_eq!(&login, &round_trip(&login));
        }

        #[test]
        fn ok_round_trip(
            affected_rows in any::<u64>(),
            last_insert_id in any::<u64>(),
            status in any::<u16>(),
            warnings in any::<u16>(),
        ) {
            let ok = OkPacket { affected_rows, last_insert_id, status, warnings };
            prop_assert_eq!(&ok, &round_trip(&ok));
        }

        #[test]
        fn header_and_eof_round_trip(column_count in any::<u64>(), warnings in any::<u16>(), status in any::<u16>()) {
            let header = ResultSetHeader { column_count };
            prop_assert_eq!(header, round_trip(&header));
            let eof = EofPacket { warnings, status };
            prop_assert_eq!(eof, round_trip(&eof));
        }

        #[test]
        fn field_round_trip(
            names in proptest::array::uniform6(arb_name()),
            charset in any::<u16>(),
            column_length in any::<u32>(),
            column_type in any::<u8>(),
            flags in any::<u16>(),
            decimals in any::<u8>(),
        ) {
            let [catalog, database, table, org_table, name, org_name] = names;
            let field = FieldDescriptor {
                catalog,
                database,
                table,
                org_table,
                name,
                org_name,
                charset,
                column_length,
                column_type,
                flags,
                decimals,
            };
            prop_assert_eq!(&field, &round_trip(&field));
        }

        #[test]
        fn row_round_trip(values in proptest::collection::vec(arb_name(), 0..8)) {
            let row = RowPacket { values };
            prop_assert_eq!(&row, &round_trip(&row));
        }

        #[test]
        fn query_round_trip(sql in "[ -~]{0,200}") {
            let cmd = Command::Query(sql);
            prop_assert_eq!(&cmd, &round_trip(&cmd));
        }
    }
}
