use thiserror::Error;

use crate::model::{Series, SessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkoutSessionError {
    #[error("session name must not be empty")]
    EmptyName,
}

/// One concrete workout instance: an ordered list of series.
///
/// The series order is meaningful and fixed at load time. The session itself
/// carries no cursor; navigation and completion state live in the tracker
/// that owns the session for the lifetime of the view.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    id: SessionId,
    name: String,
    series: Vec<Series>,
}

impl WorkoutSession {
    /// Build a session from loaded data.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutSessionError::EmptyName` if the name is empty.
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        series: Vec<Series>,
    ) -> Result<Self, WorkoutSessionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WorkoutSessionError::EmptyName);
        }

        Ok(Self { id, name, series })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn series_at(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Mark the exercise at the given position as completed.
    ///
    /// Returns the exercise id when the position is valid, `None` otherwise.
    /// Completing an already-completed exercise is a no-op that still
    /// returns the id.
    pub fn complete_exercise_at(
        &mut self,
        series_index: usize,
        exercise_index: usize,
    ) -> Option<crate::model::SessionExerciseId> {
        let exercise = self
            .series
            .get_mut(series_index)?
            .exercise_mut(exercise_index)?;
        exercise.complete();
        Some(exercise.id())
    }

    /// Mark the series at the given position as completed.
    ///
    /// Returns the series id when the position is valid, `None` otherwise.
    pub fn complete_series_at(&mut self, series_index: usize) -> Option<crate::model::SeriesId> {
        let series = self.series.get_mut(series_index)?;
        series.complete();
        Some(series.id())
    }

    /// Total number of exercises across all series.
    #[must_use]
    pub fn total_exercises(&self) -> usize {
        self.series.iter().map(Series::exercise_count).sum()
    }
}
