use crate::protocol::{encode_line, parse_reply, Reply, Request};
use ribbon_core::{Result, RibbonError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tracing::{debug, warn};

/// Recents helper client.
///
/// Each request opens a fresh connection, writes one line and waits for one
/// line back, all bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct RecentsClient {
    socket:  PathBuf,
    timeout: Duration,
}

impl RecentsClient {
    pub fn new(socket: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { socket: socket.into(), timeout }
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    /// Ask the helper to open the recent-apps screen.
    pub async fn send(&self, request: Request) -> Result<Reply> {
        tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| RibbonError::Ipc(format!("no reply within {:?}", self.timeout)))?
    }

    /// Like [`send`](Self::send) but folds transport errors into a failed reply.
    pub async fn open_recents(&self) -> Reply {
        match self.send(Request::OpenRecents).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Recents helper unreachable at '{}': {e}", self.socket.display());
                Reply::failure(e.to_string())
            }
        }
    }

    async fn exchange(&self, request: Request) -> Result<Reply> {
        let mut stream = UnixStream::connect(&self.socket)
            .await
            .map_err(|e| RibbonError::Ipc(format!("connect: {e}")))?;

        stream
            .write_all(encode_line(&request)?.as_bytes())
            .await
            .map_err(|e| RibbonError::Ipc(format!("write: {e}")))?;

        let mut lines = BufReader::new(&mut stream).lines();
        let line = lines
            .next_line()
            .await
            .map_err(|e| RibbonError::Ipc(format!("read: {e}")))?
            .ok_or_else(|| RibbonError::Ipc("helper closed without replying".into()))?;

        debug!("Recents helper replied: {line}");
        parse_reply(&line)
    }
}
