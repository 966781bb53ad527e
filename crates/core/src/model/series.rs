use thiserror::Error;

use crate::model::{SeriesId, SessionExercise};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeriesError {
    #[error("series name must not be empty")]
    EmptyName,
}

/// An ordered group of exercises within a session (a circuit / superset).
///
/// Exercise order is fixed at load time. A series may legitimately contain
/// zero exercises. Completion is an explicit action: it is never derived
/// from all child exercises being complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    id: SeriesId,
    name: String,
    exercises: Vec<SessionExercise>,
    is_completed: bool,
}

impl Series {
    /// Build a series from loaded session data.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::EmptyName` if the name is empty.
    pub fn new(
        id: SeriesId,
        name: impl Into<String>,
        exercises: Vec<SessionExercise>,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SeriesError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            exercises,
            is_completed: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn exercises(&self) -> &[SessionExercise] {
        &self.exercises
    }

    #[must_use]
    pub fn exercise(&self, index: usize) -> Option<&SessionExercise> {
        self.exercises.get(index)
    }

    pub(crate) fn exercise_mut(&mut self, index: usize) -> Option<&mut SessionExercise> {
        self.exercises.get_mut(index)
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Mark the series as completed.
    ///
    /// Returns true if the call changed anything. Completion never reverts.
    pub fn complete(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        true
    }
}
