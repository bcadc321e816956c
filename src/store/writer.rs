//! 写后台任务：请求路径只入队不等待，由单个任务按入队顺序落盘。

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::catalog::Language;
use crate::reminder::ReminderSettings;
use crate::stats::StatsState;
use crate::store::operations::preferences::Preferences;
use crate::store::{Store, StoreError};

#[derive(Debug)]
pub enum WriteOp {
    Stats(StatsState),
    DailyGoal(u32),
    Preferences(Preferences),
    ReminderSettings(ReminderSettings),
    AlarmIds(Vec<String>),
    KnownWord {
        language: Language,
        term: String,
        known: bool,
    },
}

#[derive(Debug)]
enum Message {
    Write(WriteOp),
    Flush(oneshot::Sender<Result<(), StoreError>>),
}

impl WriteOp {
    fn name(&self) -> &'static str {
        match self {
            Self::Stats(_) => "stats",
            Self::DailyGoal(_) => "daily_goal",
            Self::Preferences(_) => "preferences",
            Self::ReminderSettings(_) => "reminder_settings",
            Self::AlarmIds(_) => "alarm_ids",
            Self::KnownWord { .. } => "known_word",
        }
    }
}

/// Handle for fire-and-forget persistence. Cloning shares the same queue.
#[derive(Debug, Clone)]
pub struct StoreWriter {
    tx: mpsc::UnboundedSender<Message>,
}

impl StoreWriter {
    pub fn spawn(store: Arc<Store>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(store, rx));
        (Self { tx }, handle)
    }

    /// Queues a write. Never blocks and never fails the caller.
    pub fn enqueue(&self, op: WriteOp) {
        let name = op.name();
        if self.tx.send(Message::Write(op)).is_err() {
            tracing::warn!(op = name, "Store writer closed, write dropped");
        }
    }

    /// Waits until every write queued before this call has been applied, then flushes sled.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Message::Flush(ack_tx))
            .map_err(|_| StoreError::WriterClosed)?;
        ack_rx.await.map_err(|_| StoreError::WriterClosed)?
    }
}

async fn run(store: Arc<Store>, mut rx: mpsc::UnboundedReceiver<Message>) {
    tracing::debug!("Store writer started");
    while let Some(message) = rx.recv().await {
        match message {
            Message::Flush(ack) => {
                let result = store.flush();
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "Store flush failed");
                }
                let _ = ack.send(result);
            }
            Message::Write(op) => {
                let name = op.name();
                if let Err(e) = apply(&store, op) {
                    tracing::warn!(op = name, error = %e, "Deferred store write failed");
                }
            }
        }
    }
    tracing::debug!("Store writer stopped");
}

fn apply(store: &Store, op: WriteOp) -> Result<(), StoreError> {
    match op {
        WriteOp::Stats(stats) => store.save_stats(&stats),
        WriteOp::DailyGoal(goal) => store.save_daily_goal(goal),
        WriteOp::Preferences(prefs) => store.save_preferences(&prefs),
        WriteOp::ReminderSettings(settings) => store.save_reminder_settings(&settings),
        WriteOp::AlarmIds(ids) => store.save_alarm_ids(&ids),
        WriteOp::KnownWord {
            language,
            term,
            known,
        } => store.set_word_known(language, &term, known),
    }
}
