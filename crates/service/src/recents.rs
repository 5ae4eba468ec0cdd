use ribbon_core::Message;
use ribbon_ipc::RecentsClient;
use ribbon_overlay::RecentsHelper;
use tokio::sync::mpsc::UnboundedSender;

/// [`RecentsHelper`] that talks to the helper over its Unix socket and
/// posts the verdict back on the controller queue.
pub struct IpcRecentsHelper {
    client: RecentsClient,
    tx:     UnboundedSender<Message>,
}

impl IpcRecentsHelper {
    pub fn new(client: RecentsClient, tx: UnboundedSender<Message>) -> Self {
        Self { client, tx }
    }
}

impl RecentsHelper for IpcRecentsHelper {
    fn request_open(&mut self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let reply = client.open_recents().await;
            let _ = tx.send(Message::RecentsReply { ok: reply.ok, reason: reply.reason });
        });
    }
}
