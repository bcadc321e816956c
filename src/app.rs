//! 启动装配：打开存储、加载词库、启动写入任务并恢复会话。main 与集成测试共用。

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::catalog::{CatalogError, CatalogSet};
use crate::clock::Clock;
use crate::config::Config;
use crate::reminder::AlarmBook;
use crate::session::DrillSession;
use crate::state::AppState;
use crate::store::{Store, StoreError, StoreWriter};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Must run inside a tokio runtime; the returned handle is the store writer task.
pub fn bootstrap(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<(AppState, JoinHandle<()>), StartupError> {
    let store = Arc::new(Store::open(&config.sled_path)?);
    store.run_migrations()?;

    let catalogs = CatalogSet::builtin()?;
    let (writer, writer_handle) = StoreWriter::spawn(store.clone());
    let alarms = Arc::new(AlarmBook::new());

    let mut session = DrillSession::load(
        &store,
        catalogs,
        &config.quiz,
        config.reminder.clone(),
        writer.clone(),
        alarms.clone(),
        clock.now(),
    );
    let restored = alarms.restore(session.alarm_ids(), session.reminder_settings());
    session.set_alarm_ids(restored);

    let state = AppState::new(store, writer, session, alarms, clock);
    Ok((state, writer_handle))
}
