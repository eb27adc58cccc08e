use anyhow::{Result, anyhow};
use datasource::Fetcher;
use datasource::memory::MemoryStore;
use datasource::mongodb::MongoFetcher;
use mysqlsrv::ProtocolHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{Instrument, debug, error, info, info_span};

use crate::args::{Cli, SourceKind};

/// Build the record store selected on the command line.
pub async fn build_fetcher(cli: &Cli) -> Result<Arc<dyn Fetcher>> {
    match cli.source {
        SourceKind::Memory => {
            let path = cli
                .data_file
                .as_ref()
                .ok_or_else(|| anyhow!("--data-file is required for the memory source"))?;
            let store = MemoryStore::from_json_file(path)?;
            let tables: Vec<_> = store.table_names().collect();
            info!(path = %path.display(), ?tables, "loaded data file");
            Ok(Arc::new(store))
        }
        SourceKind::Mongodb => {
            let (uri, database) = match (&cli.mongodb_uri, &cli.database) {
                (Some(uri), Some(database)) => (uri, database),
                _ => {
                    return Err(anyhow!(
                        "--mongodb-uri and --database are required for the mongodb source"
                    ));
                }
            };
            let fetcher = MongoFetcher::connect(uri, database).await?;
            info!(%database, "using mongodb source");
            Ok(Arc::new(fetcher))
        }
    }
}

pub struct Server {
    listener: TcpListener,
    handler: Arc<ProtocolHandler>,
}

impl Server {
    pub async fn bind(addr: &str, handler: ProtocolHandler) -> Result<Server> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Server {
            listener,
            handler: Arc::new(handler),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        spawn_shutdown_handler(tx);
        self.serve_until(rx).await
    }

    /// Accept connections until `shutdown` fires. Sessions already running
    /// are left to finish on their own.
    pub async fn serve_until(self, mut shutdown: oneshot::Receiver<()>) -> Result<()> {
        info!(addr = %self.local_addr()?, "listening for connections");

        let mut next_id: u64 = 1;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutting down");
                    return Ok(());
                }

                result = self.listener.accept() => {
                    let (conn, peer) = match result {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            error!(%e, "failed to accept connection");
                            continue;
                        }
                    };
                    if let Err(e) = conn.set_nodelay(true) {
                        debug!(%e, %peer, "failed to set nodelay");
                    }

                    let id = next_id;
                    next_id += 1;
                    let handler = self.handler.clone();
                    let span = info_span!("conn", id, %peer);

                    tokio::spawn(
                        async move {
                            info!("client connected");
                            match handler.handle_connection(conn).await {
                                Ok(()) => info!("client disconnected"),
                                Err(e) => info!(%e, "client disconnected with error"),
                            }
                        }
                        .instrument(span),
                    );
                }
            }
        }
    }
}

fn spawn_shutdown_handler(tx: oneshot::Sender<()>) {
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!(%e, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("shutdown triggered");
        let _ = tx.send(());
    });
}
