#![allow(dead_code)]

use async_trait::async_trait;
use healthz_service::handlers::HealthState;
use healthz_service::services::DatabaseProbe;
use healthz_service::startup::Application;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_PROBE_TIMEOUT: Duration = Duration::from_millis(200);

/// Stand-in database whose reachability can be flipped mid-test.
#[derive(Default)]
pub struct SwitchableDb {
    down: AtomicBool,
    pings: AtomicUsize,
}

impl SwitchableDb {
    pub fn up() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn down() -> Arc<Self> {
        let db = Self::default();
        db.down.store(true, Ordering::SeqCst);
        Arc::new(db)
    }

    pub fn partition(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseProbe for SwitchableDb {
    async fn ping(&self) -> Result<(), AppError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(AppError::ProbeError(anyhow::anyhow!(
                "connection refused by 127.0.0.1:27017"
            )));
        }
        Ok(())
    }
}

/// A database that accepts the ping and never answers.
pub struct HangingDb;

#[async_trait]
impl DatabaseProbe for HangingDb {
    async fn ping(&self) -> Result<(), AppError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

pub fn state_for(db: Arc<dyn DatabaseProbe>) -> HealthState {
    HealthState::new(db, TEST_PROBE_TIMEOUT)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(db: Arc<dyn DatabaseProbe>) -> Self {
        let app = Application::build_with_state(state_for(db), 0)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address, port }
    }

    pub fn health_url(&self) -> String {
        format!("{}/healthz", self.address)
    }
}
