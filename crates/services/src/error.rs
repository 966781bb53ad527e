//! Shared error types for the services crate.

use thiserror::Error;

use coach_core::model::PlanError;
use storage::repository::StorageError;
use storage::rest::RestInitError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
    #[error("session has no series")]
    Empty,
    #[error("no active exercise to complete")]
    NoActiveExercise,
    #[error("no active series")]
    NoActiveSeries,
    #[error("a session load is already in progress")]
    LoadInProgress,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PlanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanServiceError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `BrandingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BrandingServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Rest(#[from] RestInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
