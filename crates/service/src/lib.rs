//! Runtime wiring for the overlay: one ordered message queue fed by timers,
//! the recents helper, the appearance store watcher and a scripted input
//! source, drained by a single [`OverlayController`].

pub mod headless;
pub mod input;
pub mod recents;
pub mod scheduler;

use headless::{ExternalVolume, HeadlessAudio, HeadlessShell, HeadlessWindow, LogNotifier};
use input::ScriptParser;
use recents::IpcRecentsHelper;
use ribbon_config::{FileStore, FileWatcher, RibbonConfig};
use ribbon_core::{Message, OverlayWindowState, Result};
use ribbon_ipc::RecentsClient;
use ribbon_overlay::{Collaborators, OverlayController};
use scheduler::TokioScheduler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

/// Load config, then drive the overlay from stdin until it stops.
pub fn run() -> Result<()> {
    let path = ribbon_config::default_path();
    let config = ribbon_config::load(&path).unwrap_or_else(|e| {
        warn!("Failed to load config: {e}. Using defaults.");
        RibbonConfig::default()
    });

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let state = runtime.block_on(serve(config, BufReader::new(tokio::io::stdin())))?;
    info!("ribbon stopped at ({}, {})", state.x, state.y);
    Ok(())
}

/// Build the controller with headless host collaborators, start it and
/// process the queue until it stops.  Returns the final window state.
pub async fn serve<R>(config: RibbonConfig, input: R) -> Result<OverlayWindowState>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();

    let store_path = config.store.resolved_path();
    let client = RecentsClient::new(config.recents.socket_path(), config.recents.timeout());
    info!("Recents helper at '{}'", client.socket().display());

    let audio = HeadlessAudio::default();
    let external = audio.external();

    let parts = Collaborators {
        window:    Box::new(HeadlessWindow::default()),
        audio:     Box::new(audio),
        system:    Box::new(HeadlessShell),
        recents:   Box::new(IpcRecentsHelper::new(client, tx.clone())),
        notifier:  Box::new(LogNotifier),
        scheduler: Box::new(TokioScheduler::new(tx.clone())),
        store:     Box::new(FileStore::open(&store_path)),
    };
    let mut controller = OverlayController::new(&config, parts);
    controller.start()?;

    let (_watcher, commits) = FileWatcher::spawn(&store_path);
    tokio::spawn(forward_commits(commits, tx.clone()));
    tokio::spawn(read_script(input, external, tx.clone()));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Shutdown);
        }
    });

    while let Some(message) = rx.recv().await {
        controller.handle(message);
        if !controller.is_running() {
            break;
        }
    }
    Ok(controller.window_state())
}

async fn forward_commits(mut commits: mpsc::Receiver<()>, tx: UnboundedSender<Message>) {
    while commits.recv().await.is_some() {
        if tx.send(Message::AppearanceCommitted).is_err() {
            break;
        }
    }
}

/// Feed script lines to the queue.  `volume N` plays another audio client:
/// the host level changes first, then the overlay is told about it.
async fn read_script<R>(input: R, audio: ExternalVolume, tx: UnboundedSender<Message>)
where
    R: AsyncBufRead + Unpin,
{
    let mut parser = ScriptParser::new();
    let mut lines = input.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parser.parse_line(&line) {
                Ok(Some(message)) => {
                    let message = match message {
                        Message::ExternalVolume(level) => Message::ExternalVolume(audio.set(level)),
                        other => other,
                    };
                    if tx.send(message).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("input: {e}"),
            },
            Ok(None) => {
                debug!("input closed");
                break;
            }
            Err(e) => {
                warn!("input read failed: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_config::StoreConfig;
    use ribbon_overlay::AudioHost;

    fn config(dir: &std::path::Path) -> RibbonConfig {
        let mut config = RibbonConfig::default();
        config.overlay.initial_x = 0;
        config.overlay.initial_y = 0;
        config.store = StoreConfig { path: Some(dir.join("appearance.toml")) };
        config.recents.socket = Some(dir.join("recents.sock"));
        config
    }

    #[tokio::test]
    async fn scripted_drag_then_close() {
        let dir = tempfile::tempdir().unwrap();
        let script: &'static [u8] = b"down 0 0\nmove 50 0\nup\nclick close\n";

        let state = serve(config(dir.path()), script).await.unwrap();
        assert_eq!((state.x, state.y), (50, 0));
        assert!(!state.visible);
    }

    #[tokio::test]
    async fn scripted_volume_moves_the_host_level() {
        let audio = HeadlessAudio::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let script: &'static [u8] = b"volume 12\nvolume 40\n";

        read_script(script, audio.external(), tx).await;

        assert_eq!(rx.recv().await, Some(Message::ExternalVolume(12)));
        assert_eq!(rx.recv().await, Some(Message::ExternalVolume(15)));
        assert_eq!(audio.level(), 15);
    }

    #[tokio::test]
    async fn bad_lines_do_not_stop_the_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let script: &'static [u8] = b"# warm up\nwiggle\nscroll 2\nquit\n";

        let state = serve(config(dir.path()), script).await.unwrap();
        assert_eq!((state.x, state.y), (0, 0));
    }
}
