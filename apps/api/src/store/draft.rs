//! Background mirror of the live session into the draft key.
//!
//! Callers never wait on a draft write. Bursts of updates collapse into the
//! last one before it reaches storage; failures are logged and dropped.

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::models::session::Session;
use crate::store::SessionStore;

enum DraftWrite {
    Save(Box<Session>),
    Clear,
}

enum DraftCommand {
    Write(DraftWrite),
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct DraftMirror {
    tx: mpsc::UnboundedSender<DraftCommand>,
}

impl DraftMirror {
    /// Starts the writer task on the current runtime.
    pub fn spawn(store: SessionStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx));
        Self { tx }
    }

    pub fn publish(&self, session: &Session) {
        self.send(DraftCommand::Write(DraftWrite::Save(Box::new(session.clone()))));
    }

    pub fn clear(&self) {
        self.send(DraftCommand::Write(DraftWrite::Clear));
    }

    /// Resolves once every command queued before it has been applied.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(DraftCommand::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    fn send(&self, command: DraftCommand) {
        if self.tx.send(command).is_err() {
            warn!("Draft writer has stopped; change not persisted");
        }
    }
}

async fn run_writer(store: SessionStore, mut rx: mpsc::UnboundedReceiver<DraftCommand>) {
    while let Some(first) = rx.recv().await {
        let mut latest = None;
        let mut waiters = Vec::new();
        let mut next = Some(first);

        // Drain whatever is already queued; only the last write matters.
        while let Some(command) = next {
            match command {
                DraftCommand::Write(write) => latest = Some(write),
                DraftCommand::Flush(ack) => waiters.push(ack),
            }
            next = rx.try_recv().ok();
        }

        if let Some(write) = latest {
            let result = match write {
                DraftWrite::Save(session) => store.save_draft(&session).await,
                DraftWrite::Clear => store.clear_draft().await,
            };
            if let Err(e) = result {
                warn!("Draft write failed: {e}");
            }
        }

        for ack in waiters {
            let _ = ack.send(());
        }
    }
}
