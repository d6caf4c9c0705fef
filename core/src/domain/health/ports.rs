use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, health::entities::StorageHealthStatus,
};

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckRepository: Send + Sync {
    /// Round-trip time to the backing store in milliseconds.
    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn readiness(&self) -> impl Future<Output = Result<StorageHealthStatus, CoreError>> + Send;
}

pub trait HealthCheckService: Send + Sync {
    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn readiness(&self) -> impl Future<Output = Result<StorageHealthStatus, CoreError>> + Send;
}
