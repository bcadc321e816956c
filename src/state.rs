use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, MutexGuard};

use crate::clock::{Clock, Moment};
use crate::reminder::AlarmBook;
use crate::session::DrillSession;
use crate::store::{Store, StoreWriter};

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    writer: StoreWriter,
    session: Arc<Mutex<DrillSession>>,
    alarms: Arc<AlarmBook>,
    clock: Arc<dyn Clock>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<Store>,
        writer: StoreWriter,
        session: DrillSession,
        alarms: Arc<AlarmBook>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            writer,
            session: Arc::new(Mutex::new(session)),
            alarms,
            clock,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn writer(&self) -> &StoreWriter {
        &self.writer
    }

    /// 所有会话状态转换都在这把锁内完成，写入也在锁内入队
    pub async fn session(&self) -> MutexGuard<'_, DrillSession> {
        self.session.lock().await
    }

    pub fn alarms(&self) -> &AlarmBook {
        &self.alarms
    }

    pub fn now(&self) -> Moment {
        self.clock.now()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
