use thiserror::Error;

use crate::model::{BrandingError, ExerciseError, PlanError, SeriesError, WorkoutSessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Session(#[from] WorkoutSessionError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Branding(#[from] BrandingError),
}
