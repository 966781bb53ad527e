use thiserror::Error;
use url::Url;

use crate::model::{ExerciseId, SessionExerciseId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise name must not be empty")]
    EmptyName,

    #[error("exercise level must be at least 1, got {0}")]
    InvalidLevel(u32),

    #[error("exercise weight must be a non-negative finite number")]
    InvalidWeight,
}

/// One exercise instance inside a series, with the level-specific
/// video/repetitions/weight already resolved at load time.
///
/// Completion flips exactly once per session instance; there is no way to
/// un-complete an exercise while the session is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    id: SessionExerciseId,
    exercise_id: ExerciseId,
    name: String,
    level: u32,
    video_url: Url,
    repetitions: u32,
    weight: f64,
    is_completed: bool,
}

impl SessionExercise {
    /// Build an exercise instance from loaded session data.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` if the name is empty, the level is zero, or
    /// the weight is negative or not finite.
    pub fn new(
        id: SessionExerciseId,
        exercise_id: ExerciseId,
        name: impl Into<String>,
        level: u32,
        video_url: Url,
        repetitions: u32,
        weight: f64,
    ) -> Result<Self, ExerciseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ExerciseError::EmptyName);
        }
        if level == 0 {
            return Err(ExerciseError::InvalidLevel(level));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ExerciseError::InvalidWeight);
        }

        Ok(Self {
            id,
            exercise_id,
            name,
            level,
            video_url,
            repetitions,
            weight,
            is_completed: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionExerciseId {
        self.id
    }

    #[must_use]
    pub fn exercise_id(&self) -> ExerciseId {
        self.exercise_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn video_url(&self) -> &Url {
        &self.video_url
    }

    #[must_use]
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Mark the exercise as completed.
    ///
    /// Returns true if the call changed anything, false when the exercise
    /// was already completed. Completion never reverts.
    pub fn complete(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        true
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> Url {
        Url::parse("https://videos.example.com/squat-l2.mp4").unwrap()
    }

    fn build(name: &str, level: u32, weight: f64) -> Result<SessionExercise, ExerciseError> {
        SessionExercise::new(
            SessionExerciseId::generate(),
            ExerciseId::generate(),
            name,
            level,
            video(),
            12,
            weight,
        )
    }

    #[test]
    fn new_exercise_starts_uncompleted() {
        let exercise = build("Squat", 2, 40.0).unwrap();
        assert!(!exercise.is_completed());
        assert_eq!(exercise.level(), 2);
        assert_eq!(exercise.repetitions(), 12);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(build("  ", 1, 0.0).unwrap_err(), ExerciseError::EmptyName);
    }

    #[test]
    fn level_zero_is_rejected() {
        assert_eq!(build("Squat", 0, 0.0).unwrap_err(), ExerciseError::InvalidLevel(0));
    }

    #[test]
    fn negative_or_nan_weight_is_rejected() {
        assert_eq!(build("Squat", 1, -1.0).unwrap_err(), ExerciseError::InvalidWeight);
        assert_eq!(build("Squat", 1, f64::NAN).unwrap_err(), ExerciseError::InvalidWeight);
    }

    #[test]
    fn complete_flips_once() {
        let mut exercise = build("Squat", 1, 0.0).unwrap();
        assert!(exercise.complete());
        assert!(exercise.is_completed());
        // second call is a no-op, not an error
        assert!(!exercise.complete());
        assert!(exercise.is_completed());
    }
}
