use crate::protocol::{encode_line, parse_request, Reply, Request};
use ribbon_core::{Result, RibbonError};
use std::os::unix::fs::FileTypeExt;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{info, warn};

/// Bind the helper socket, replacing a stale socket file left by a previous run.
/// Anything else at `path` is left alone and reported as an error.
pub fn bind(path: impl AsRef<Path>) -> Result<UnixListener> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_socket() => std::fs::remove_file(path)?,
        Ok(_) => {
            return Err(RibbonError::Ipc(format!(
                "'{}' exists and is not a socket",
                path.display()
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    let listener = UnixListener::bind(path)?;
    info!("Recents helper listening on {}", path.display());
    Ok(listener)
}

/// Answer requests forever.  `handler` performs the action and returns the verdict.
pub async fn serve<F>(listener: UnixListener, handler: F)
where
    F: Fn(Request) -> Reply + Send + Sync + Clone + 'static,
{
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let handler = handler.clone();
                tokio::spawn(async move {
                    if let Err(e) = answer(stream, handler).await {
                        warn!("Recents request failed: {e}");
                    }
                });
            }
            Err(e) => warn!("Accept failed: {e}"),
        }
    }
}

async fn answer<F>(mut stream: UnixStream, handler: F) -> Result<()>
where
    F: Fn(Request) -> Reply,
{
    let (read, mut write) = stream.split();
    let mut lines = BufReader::new(read).lines();

    let reply = match lines.next_line().await? {
        Some(line) => match parse_request(&line) {
            Ok(request) => handler(request),
            Err(e) => Reply::failure(e.to_string()),
        },
        None => return Ok(()),
    };

    write.write_all(encode_line(&reply)?.as_bytes()).await?;
    write.shutdown().await?;
    Ok(())
}
