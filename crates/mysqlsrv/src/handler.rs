use crate::codec::{FramedConn, Packet};
use crate::errors::{QueryError, Result};
use crate::messages::{
    BackendMessage, CHARSET_LATIN1, Command, DEFAULT_CAPABILITIES, Greeting, LoginRequest,
    OkPacket, Payload, SERVER_STATUS_AUTOCOMMIT,
};
use crate::resultset::result_set_messages;
use datasource::Fetcher;
use parser::parse_statement;
use parser::statement::Statement;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, trace, warn};
use translate::{ResultTable, to_result_table, translate_select};

/// Version announced when none is configured.
pub const DEFAULT_SERVER_VERSION: &str = "5.1.53-sqlgate";

/// Protocol level settings shared by all sessions.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Version string announced in the greeting.
    pub server_version: String,
    pub capabilities: u16,
    pub charset: u8,
    /// Status flags sent with OK and EOF packets.
    pub status: u16,
    /// Close sessions that don't send a command for this long.
    pub idle_timeout: Option<Duration>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        HandlerConfig {
            server_version: DEFAULT_SERVER_VERSION.to_string(),
            capabilities: DEFAULT_CAPABILITIES,
            charset: CHARSET_LATIN1,
            status: SERVER_STATUS_AUTOCOMMIT,
            idle_timeout: None,
        }
    }
}

/// Implements the MySQL client/server protocol on top of a record store.
pub struct ProtocolHandler {
    fetcher: Arc<dyn Fetcher>,
    conf: HandlerConfig,
    next_conn_id: AtomicU32,
}

impl ProtocolHandler {
    pub fn new(fetcher: Arc<dyn Fetcher>, conf: HandlerConfig) -> ProtocolHandler {
        ProtocolHandler {
            fetcher,
            conf,
            next_conn_id: AtomicU32::new(1),
        }
    }

    /// Runs the protocol for a connection to completion.
    ///
    /// Returns an error only for framing and IO failures. Failed queries are
    /// acknowledged with an OK and the session continues.
    pub async fn handle_connection<C>(&self, conn: C) -> Result<()>
    where
        C: AsyncRead + AsyncWrite + Unpin,
    {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        let conn = FramedConn::new(conn);
        let mut session = ClientSession::new(conn, self.fetcher.clone(), &self.conf);
        session.handshake(conn_id).await?;
        session.run().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// Greeting sent, waiting for the login request.
    Handshaking,
    AwaitingCommand,
    Processing,
    Closed,
}

struct ClientSession<'a, C> {
    conn: FramedConn<C>,
    fetcher: Arc<dyn Fetcher>,
    conf: &'a HandlerConfig,
    state: SessionState,
}

impl<'a, C> ClientSession<'a, C>
where
    C: AsyncRead + AsyncWrite + Unpin,
{
    fn new(conn: FramedConn<C>, fetcher: Arc<dyn Fetcher>, conf: &'a HandlerConfig) -> Self {
        ClientSession {
            conn,
            fetcher,
            conf,
            state: SessionState::Handshaking,
        }
    }

    /// Greet the client and accept its login. Leaves the session closed if
    /// the client hangs up before logging in.
    async fn handshake(&mut self, conn_id: u32) -> Result<()> {
        let greeting = Greeting::new(
            self.conf.server_version.clone(),
            conn_id,
            self.conf.capabilities,
            self.conf.charset,
            self.conf.status,
        )?;
        self.conn.send(BackendMessage::Greeting(greeting)).await?;

        let login = match self.conn.read_packet().await? {
            Some(packet) => packet,
            None => {
                debug!(conn_id, "connection closed during handshake");
                self.state = SessionState::Closed;
                return Ok(());
            }
        };
        // Credentials aren't checked, anything the client sends is accepted.
        match LoginRequest::decode(&login.payload) {
            Ok(login) => info!(
                conn_id,
                user = %login.username,
                database = ?login.database,
                "client logged in"
            ),
            Err(e) => debug!(conn_id, %e, "accepting undecodable login request"),
        }

        self.send_ok().await?;
        self.state = SessionState::AwaitingCommand;
        Ok(())
    }

    async fn run(mut self) -> Result<()> {
        while self.state != SessionState::Closed {
            self.conn.reset_sequence();
            self.state = SessionState::AwaitingCommand;

            let packet = match self.read_command().await? {
                Some(packet) => packet,
                None => {
                    self.state = SessionState::Closed;
                    continue;
                }
            };

            self.state = SessionState::Processing;
            match Command::decode(&packet.payload)? {
                Command::Quit => {
                    trace!("client quit");
                    self.state = SessionState::Closed;
                }
                Command::Query(sql) => self.query(&sql).await?,
                Command::InitDb(database) => {
                    debug!(%database, "ignoring schema change");
                    self.send_ok().await?;
                }
                Command::Ping => self.send_ok().await?,
                Command::Other { code, .. } => {
                    debug!(code, "unsupported command");
                    self.send_ok().await?;
                }
            }
        }

        trace!("session closed");
        Ok(())
    }

    /// Wait for the next command. `None` once the client disconnects or the
    /// session has been idle for too long.
    async fn read_command(&mut self) -> Result<Option<Packet>> {
        match self.conf.idle_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.conn.read_packet()).await {
                Ok(packet) => packet,
                Err(_) => {
                    info!(?timeout, "closing idle session");
                    Ok(None)
                }
            },
            None => self.conn.read_packet().await,
        }
    }

    async fn send_ok(&mut self) -> Result<()> {
        self.conn
            .send(BackendMessage::Ok(OkPacket {
                status: self.conf.status,
                ..Default::default()
            }))
            .await
    }

    async fn query(&mut self, sql: &str) -> Result<()> {
        debug!(%sql, "received query");

        match execute(self.fetcher.as_ref(), sql).await {
            Ok(Some((table_name, table))) => {
                for msg in result_set_messages(&table_name, &table, self.conf.status) {
                    self.conn.feed(msg).await?;
                }
                self.conn.flush().await
            }
            Ok(None) => self.send_ok().await,
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    offending = %e.offending(),
                    %e,
                    %sql,
                    "query failed, acknowledging with OK"
                );
                self.send_ok().await
            }
        }
    }
}

/// Answer a statement. `None` for anything that isn't a query.
async fn execute(
    fetcher: &dyn Fetcher,
    sql: &str,
) -> Result<Option<(String, ResultTable)>, QueryError> {
    let stmt = match parse_statement(sql)? {
        Statement::Select(stmt) => stmt,
        Statement::Other { verb } => {
            info!(%verb, "unsupported statement");
            return Ok(None);
        }
    };

    let query = translate_select(stmt)?;
    debug!(table = %query.table, filter = %query.filter, "fetching");
    let records = fetcher.fetch(&query.table, &query.filter).await?;
    let table = to_result_table(&records, &query.projection);

    Ok(Some((query.table, table)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::HEADER_LEN;
    use crate::errors::{FrameError, MysqlSrvError};
    use crate::messages::{
        CLIENT_PROTOCOL_41, EofPacket, FieldDescriptor, ResultSetHeader, RowPacket,
    };
    use async_trait::async_trait;
    use bytes::BytesMut;
    use datasource::errors::DatasourceError;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
    use translate::{CompareOp, Filter, Record};

    /// Returns fixed records for one table, remembering the filters it was
    /// asked for.
    struct MockFetcher {
        table: String,
        records: Vec<Record>,
        filters: Mutex<Vec<Filter>>,
    }

    impl MockFetcher {
        fn people() -> Arc<MockFetcher> {
            Arc::new(MockFetcher {
                table: "people".to_string(),
                records: vec![
                    [("name", "Jon"), ("city", "NYC")].into_iter().collect(),
                    [("name", "GMP"), ("city", "Worc")].into_iter().collect(),
                ],
                filters: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, table: &str, filter: &Filter) -> datasource::errors::Result<Vec<Record>> {
            if table != self.table {
                return Err(DatasourceError::MissingTable(table.to_string()));
            }
            self.filters.lock().unwrap().push(filter.clone());
            Ok(self
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect())
        }
    }

    struct TestClient {
        stream: DuplexStream,
    }

    impl TestClient {
        async fn read_packet(&mut self) -> Packet {
            let mut header = [0; HEADER_LEN];
            self.stream.read_exact(&mut header).await.unwrap();
            let len = header[0] as usize | (header[1] as usize) << 8 | (header[2] as usize) << 16;
            let mut payload = vec![0; len];
            self.stream.read_exact(&mut payload).await.unwrap();
            Packet::new(header[3], payload)
        }

        async fn write_packet(&mut self, seq: u8, msg: &impl Payload) {
            let mut payload = BytesMut::new();
            msg.encode(&mut payload);
            let mut buf = BytesMut::new();
            Packet::new(seq, payload.freeze()).encode(&mut buf).unwrap();
            self.stream.write_all(&buf).await.unwrap();
        }

        async fn expect<P: Payload + PartialEq + std::fmt::Debug>(&mut self, seq: u8, expected: P) {
            let packet = self.read_packet().await;
            assert_eq!(seq, packet.seq, "sequence number of {expected:?}");
            assert_eq!(expected, P::decode(&packet.payload).unwrap());
        }

        async fn expect_ok(&mut self, seq: u8) {
            self.expect(
                seq,
                OkPacket {
                    status: SERVER_STATUS_AUTOCOMMIT,
                    ..Default::default()
                },
            )
            .await;
        }

        /// Greeting, login, and the OK acknowledging it.
        async fn handshake(&mut self) -> Greeting {
            let packet = self.read_packet().await;
            assert_eq!(0, packet.seq);
            let greeting = Greeting::decode(&packet.payload).unwrap();

            let login = LoginRequest {
                capabilities: CLIENT_PROTOCOL_41,
                max_packet_size: 1 << 24,
                charset: 8,
                username: "root".to_string(),
                auth_response: vec![1; 20],
                database: Some("test".to_string()),
            };
            self.write_packet(1, &login).await;
            self.expect_ok(2).await;
            greeting
        }

        async fn query(&mut self, sql: &str) {
            self.write_packet(0, &Command::Query(sql.to_string())).await;
        }
    }

    fn start(
        fetcher: Arc<dyn Fetcher>,
        conf: HandlerConfig,
    ) -> (TestClient, tokio::task::JoinHandle<Result<()>>) {
        let (client, server) = tokio::io::duplex(4096);
        let handler = ProtocolHandler::new(fetcher, conf);
        let handle = tokio::spawn(async move { handler.handle_connection(server).await });
        (TestClient { stream: client }, handle)
    }

    #[tokio::test]
    async fn select_all_people() {
        let fetcher = MockFetcher::people();
        let (mut client, handle) = start(fetcher.clone(), HandlerConfig::default());

        let greeting = client.handshake().await;
        assert_eq!("5.1.53-sqlgate", greeting.server_version);
        assert_eq!(1, greeting.connection_id);

        client.query("SELECT * FROM people;").await;
        client.expect(1, ResultSetHeader { column_count: 2 }).await;
        client.expect(2, FieldDescriptor::text("people", "name")).await;
        client.expect(3, FieldDescriptor::text("people", "city")).await;
        client
            .expect(
                4,
                EofPacket {
                    warnings: 0,
                    status: SERVER_STATUS_AUTOCOMMIT,
                },
            )
            .await;
        client
            .expect(
                5,
                RowPacket {
                    values: vec!["Jon".to_string(), "NYC".to_string()],
                },
            )
            .await;
        client
            .expect(
                6,
                RowPacket {
                    values: vec!["GMP".to_string(), "Worc".to_string()],
                },
            )
            .await;
        client
            .expect(
                7,
                EofPacket {
                    warnings: 0,
                    status: SERVER_STATUS_AUTOCOMMIT,
                },
            )
            .await;

        client.write_packet(0, &Command::Quit).await;
        handle.await.unwrap().unwrap();

        assert_eq!(vec![Filter::Empty], *fetcher.filters.lock().unwrap());
    }

    #[tokio::test]
    async fn empty_result() {
        let fetcher = MockFetcher::people();
        let (mut client, handle) = start(fetcher.clone(), HandlerConfig::default());
        client.handshake().await;

        client
            .query("SELECT name, city FROM people WHERE name = 'Nobody'")
            .await;
        client.expect(1, ResultSetHeader { column_count: 2 }).await;
        client.expect(2, FieldDescriptor::text("people", "name")).await;
        client.expect(3, FieldDescriptor::text("people", "city")).await;
        client
            .expect(
                4,
                EofPacket {
                    warnings: 0,
                    status: SERVER_STATUS_AUTOCOMMIT,
                },
            )
            .await;
        client
            .expect(
                5,
                EofPacket {
                    warnings: 0,
                    status: SERVER_STATUS_AUTOCOMMIT,
                },
            )
            .await;

        // Wildcard with nothing to derive columns from.
        client.query("SELECT * FROM people WHERE city = 'Paris'").await;
        client.expect(1, ResultSetHeader { column_count: 0 }).await;
        client.expect(2, EofPacket { warnings: 0, status: SERVER_STATUS_AUTOCOMMIT }).await;
        client.expect(3, EofPacket { warnings: 0, status: SERVER_STATUS_AUTOCOMMIT }).await;

        drop(client);
        handle.await.unwrap().unwrap();

        assert_eq!(
            vec![
                Filter::comparison("name", CompareOp::Eq, "Nobody"),
                Filter::comparison("city", CompareOp::Eq, "Paris"),
            ],
            *fetcher.filters.lock().unwrap()
        );
    }

    #[tokio::test]
    async fn failed_queries_are_acknowledged() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.handshake().await;

        for sql in [
            "SELECT * FROM people WHERE name LIKE 'J%'",
            "SELECT * FROM people WHERE name = @x",
            "SELECT count(*) FROM people",
            "SELECT * FROM cities",
            "INSERT INTO people VALUES ('Ana')",
            "",
        ] {
            client.query(sql).await;
            client.expect_ok(1).await;
        }

        // Session is still usable.
        client.query("SELECT city FROM people WHERE name = 'Jon'").await;
        client.expect(1, ResultSetHeader { column_count: 1 }).await;
        client.expect(2, FieldDescriptor::text("people", "city")).await;
        client.expect(3, EofPacket { warnings: 0, status: SERVER_STATUS_AUTOCOMMIT }).await;
        client
            .expect(
                4,
                RowPacket {
                    values: vec!["NYC".to_string()],
                },
            )
            .await;
        client.expect(5, EofPacket { warnings: 0, status: SERVER_STATUS_AUTOCOMMIT }).await;

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn deeply_nested_queries_are_acknowledged() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.handshake().await;

        let nested = format!(
            "SELECT * FROM people WHERE {}name = 'Jon'{}",
            "(".repeat(50_000),
            ")".repeat(50_000)
        );
        client.query(&nested).await;
        client.expect_ok(1).await;

        let chained = format!(
            "SELECT * FROM people WHERE {}",
            vec!["name = 'Jon'"; 50_000].join(" OR ")
        );
        client.query(&chained).await;
        client.expect_ok(1).await;

        client.write_packet(0, &Command::Ping).await;
        client.expect_ok(1).await;

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn other_commands_get_ok() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.handshake().await;

        client.write_packet(0, &Command::Ping).await;
        client.expect_ok(1).await;
        client
            .write_packet(0, &Command::InitDb("people".to_string()))
            .await;
        client.expect_ok(1).await;
        client
            .write_packet(
                0,
                &Command::Other {
                    code: 0x16,
                    body: vec![1, 2, 3],
                },
            )
            .await;
        client.expect_ok(1).await;

        client.write_packet(0, &Command::Quit).await;
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn sequence_restarts_for_every_command() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.handshake().await;

        for _ in 0..300 {
            client.write_packet(0, &Command::Ping).await;
            client.expect_ok(1).await;
        }

        client.write_packet(0, &Command::Quit).await;
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn out_of_sequence_command_closes_connection() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.handshake().await;

        client.write_packet(3, &Command::Ping).await;
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            MysqlSrvError::Frame(FrameError::SequenceMismatch {
                expected: 0,
                got: 3
            })
        ));
    }

    #[tokio::test]
    async fn truncated_command_closes_connection() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.handshake().await;

        // Declares 10 bytes, sends 3.
        client.stream.write_all(&[10, 0, 0, 0, 3, b'S', b'E']).await.unwrap();
        drop(client);

        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            MysqlSrvError::Frame(FrameError::TruncatedFrame {
                declared: 10,
                available: 3
            })
        ));
    }

    #[tokio::test]
    async fn undecodable_login_is_accepted() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        let greeting = client.read_packet().await;
        assert_eq!(0, greeting.seq);

        client.write_packet(1, &Command::Ping).await;
        client.expect_ok(2).await;

        client.write_packet(0, &Command::Quit).await;
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn hangup_during_handshake() {
        let (mut client, handle) = start(MockFetcher::people(), HandlerConfig::default());
        client.read_packet().await;
        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn handshake_moves_to_awaiting_command() {
        let (client, server) = tokio::io::duplex(4096);
        let conf = HandlerConfig::default();
        let mut session = ClientSession::new(FramedConn::new(server), MockFetcher::people(), &conf);
        assert_eq!(SessionState::Handshaking, session.state);

        let client = tokio::spawn(async move {
            let mut client = TestClient { stream: client };
            client.handshake().await;
            client
        });
        session.handshake(7).await.unwrap();
        assert_eq!(SessionState::AwaitingCommand, session.state);

        drop(client.await.unwrap());
        session.run().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_closed() {
        let conf = HandlerConfig {
            idle_timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let (mut client, handle) = start(MockFetcher::people(), conf);
        client.handshake().await;

        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn connection_ids_increase() {
        let fetcher: Arc<dyn Fetcher> = MockFetcher::people();
        let handler = Arc::new(ProtocolHandler::new(fetcher, HandlerConfig::default()));

        for expected in 1..=3 {
            let (client, server) = tokio::io::duplex(4096);
            let h = handler.clone();
            let handle = tokio::spawn(async move { h.handle_connection(server).await });

            let mut client = TestClient { stream: client };
            let greeting = client.handshake().await;
            assert_eq!(expected, greeting.connection_id);

            drop(client);
            handle.await.unwrap().unwrap();
        }
    }
}
