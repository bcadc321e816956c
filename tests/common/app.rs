use std::sync::Arc;

use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use tokio::task::JoinHandle;

use vocab_drill::app::bootstrap;
use vocab_drill::clock::{FixedClock, Moment};
use vocab_drill::config::{Config, QuizConfig};
use vocab_drill::reminder::ReminderPolicy;
use vocab_drill::routes::build_router;
use vocab_drill::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    pub clock: Arc<FixedClock>,
    writer_task: JoinHandle<()>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn set_local(&self, at: NaiveDateTime) {
        self.clock.set(Moment::at_local(at));
    }
}

/// 2026-01-09 10:00 local.
pub fn start_time() -> NaiveDateTime {
    local(2026, 1, 9, 10, 0)
}

pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test date")
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    let sled_path = temp_dir.path().join("vocab-drill-test.sled");

    // 直接构造 Config，避免 set_var 造成多线程测试环境变量竞态
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:8081".to_string(),
        quiz: QuizConfig::default(),
        reminder: ReminderPolicy::default(),
    }
}

pub async fn spawn_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&temp_dir);
    spawn_with(config, temp_dir).await
}

/// Starts an app over an existing data dir, e.g. to check what survives a restart.
pub async fn spawn_with(config: Config, temp_dir: TempDir) -> TestApp {
    let clock = Arc::new(FixedClock::new(Moment::at_local(start_time())));

    let (state, writer_task) = bootstrap(&config, clock.clone()).expect("bootstrap");
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        clock,
        writer_task,
        _temp_dir: temp_dir,
    }
}

/// Stops `app` after draining its writes and returns the data dir for a second boot.
pub async fn shutdown(app: TestApp) -> (Config, TempDir) {
    app.state.writer().flush().await.expect("flush writes");
    let TestApp {
        app: router,
        state,
        config,
        writer_task,
        _temp_dir,
        ..
    } = app;
    drop(router);
    drop(state);
    // writer 任务持有 Store，退出后 sled 才释放目录锁
    tokio::time::timeout(std::time::Duration::from_secs(5), writer_task)
        .await
        .expect("writer task exits once every handle is dropped")
        .expect("writer task did not panic");
    (config, _temp_dir)
}
