//! Driving port for the front-desk dashboard.

use async_trait::async_trait;

use crate::domain::{DashboardSnapshot, Error};

/// Read-only dashboard aggregation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn snapshot(&self) -> Result<DashboardSnapshot, Error>;
}
