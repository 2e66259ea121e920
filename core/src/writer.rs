// core/src/writer.rs

//! Single background task that applies cart writes in the order they were
//! issued. Callers enqueue and move on; failures are logged here and go no
//! further.

use crate::persistence::KeyValueStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

pub(crate) enum WriteCommand {
  Save { blob: String, line_items: usize },
  Flush(oneshot::Sender<()>),
}

#[derive(Debug, Clone)]
pub(crate) struct PersistenceWriter {
  tx: mpsc::UnboundedSender<WriteCommand>,
}

impl PersistenceWriter {
  /// Spawns the writer task on the current Tokio runtime.
  pub(crate) fn spawn(adapter: Arc<dyn KeyValueStore>, key: String) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run(adapter, key, rx));
    PersistenceWriter { tx }
  }

  pub(crate) fn save(&self, blob: String, line_items: usize) {
    if self.tx.send(WriteCommand::Save { blob, line_items }).is_err() {
      error!("Cart persistence writer is gone; write dropped.");
    }
  }

  pub(crate) async fn flush(&self) {
    let (done_tx, done_rx) = oneshot::channel();
    if self.tx.send(WriteCommand::Flush(done_tx)).is_err() {
      return;
    }
    let _ = done_rx.await;
  }
}

async fn run(adapter: Arc<dyn KeyValueStore>, key: String, mut rx: mpsc::UnboundedReceiver<WriteCommand>) {
  debug!(key = %key, "Cart persistence writer started.");
  while let Some(command) = rx.recv().await {
    match command {
      WriteCommand::Save { blob, line_items } => match adapter.set(&key, blob).await {
        Ok(()) => debug!(key = %key, line_items, "Saved cart to storage."),
        Err(e) => error!(key = %key, error = %e, "Error saving cart; in-memory cart is unaffected."),
      },
      WriteCommand::Flush(done) => {
        let _ = done.send(());
      }
    }
  }
  debug!(key = %key, "Cart persistence writer stopped.");
}
