//! Runtime operator implementation.

use async_trait::async_trait;
use tokio::signal;
use tracing::info;

use crate::domain::stats::TickSummary;
use crate::error::Result;
use crate::port::inbound::operator::runtime::RuntimeOperator;
use crate::port::inbound::operator::session::SessionRequest;

use super::{entry::Operator, shared};

#[async_trait]
impl RuntimeOperator for Operator {
    async fn run_once(&self, request: &SessionRequest) -> Result<TickSummary> {
        let (config, services) = shared::open(request)?;
        let tracker = services.tracker(&config)?;
        Ok(tracker.tick().await)
    }

    async fn run_until_interrupted(&self, request: &SessionRequest) -> Result<()> {
        let (config, services) = shared::open(request)?;
        let handle = services.tracker(&config)?.start();

        signal::ctrl_c().await?;
        info!("Shutdown signal received (Ctrl+C)");
        handle.shutdown().await;
        Ok(())
    }
}
