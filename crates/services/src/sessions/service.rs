use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;

use coach_core::model::{
    Series, SeriesId, SessionExercise, SessionExerciseId, WorkoutSession,
};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What happened to the cursor when a series was completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesOutcome {
    /// The next series became active.
    AdvancedToNext { series_name: String },
    /// The completed series was the last one; the cursor stays on it.
    AllComplete,
}

/// What happened to the cursor when an exercise was completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseOutcome {
    /// Advanced to the next exercise within the active series.
    Advanced,
    /// The exercise closed its series; series completion ran automatically.
    SeriesCompleted(SeriesOutcome),
    /// Final exercise of the final series: the cursor stays put.
    ///
    /// The final series is deliberately not auto-completed here; callers that
    /// want it flagged must invoke `complete_series` explicitly.
    SessionComplete,
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// In-memory progress tracker for one workout session instance.
///
/// Owns the session tree exclusively for the lifetime of the hosting view
/// and steps a (series, exercise) cursor through it. All transitions are
/// synchronous and single-threaded; persistence of the completion sets is
/// the workflow layer's concern.
pub struct SessionTracker {
    session: WorkoutSession,
    current_series: usize,
    current_exercise: usize,
    completed_exercises: HashSet<SessionExerciseId>,
    completed_series: HashSet<SeriesId>,
    started_at: DateTime<Utc>,
}

impl SessionTracker {
    /// Create a tracker positioned at the first exercise of the first series.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the session has no series. A session
    /// whose series all happen to be empty is still accepted; its progress is
    /// defined as 0.
    pub fn new(session: WorkoutSession, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if session.series_count() == 0 {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            session,
            current_series: 0,
            current_exercise: 0,
            completed_exercises: HashSet::new(),
            completed_series: HashSet::new(),
            started_at,
        })
    }

    #[must_use]
    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_series_index(&self) -> usize {
        self.current_series
    }

    #[must_use]
    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise
    }

    #[must_use]
    pub fn completed_exercises(&self) -> &HashSet<SessionExerciseId> {
        &self.completed_exercises
    }

    #[must_use]
    pub fn completed_series(&self) -> &HashSet<SeriesId> {
        &self.completed_series
    }

    //
    // ─── DERIVED VALUES ────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn active_series(&self) -> Option<&Series> {
        self.session.series_at(self.current_series)
    }

    #[must_use]
    pub fn active_exercise(&self) -> Option<&SessionExercise> {
        self.active_series()
            .and_then(|series| series.exercise(self.current_exercise))
    }

    /// True when the cursor sits on the final exercise of the active series.
    ///
    /// False when the active series has no exercises.
    #[must_use]
    pub fn is_last_exercise(&self) -> bool {
        self.active_series()
            .is_some_and(|series| self.current_exercise + 1 == series.exercise_count())
    }

    #[must_use]
    pub fn is_last_series(&self) -> bool {
        self.current_series + 1 == self.session.series_count()
    }

    /// Terminal state: last exercise of the last series, and it is completed.
    ///
    /// No forward navigation is defined past this point; callers are expected
    /// to exit the session view.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_last_series()
            && self.is_last_exercise()
            && self
                .active_exercise()
                .is_some_and(|e| self.completed_exercises.contains(&e.id()))
    }

    /// Current progress, recomputed from the completion set on every call.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.session.total_exercises();
        let completed = self.completed_exercises.len();
        let percent = if total == 0 {
            0
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                ((completed as f64 / total as f64) * 100.0).round() as u8
            }
        };

        SessionProgress {
            total,
            completed,
            percent,
            is_complete: total > 0 && completed == total,
        }
    }

    //
    // ─── OPERATIONS ────────────────────────────────────────────────────────────
    //

    /// Complete the active exercise and advance.
    ///
    /// Within a series the cursor moves to the next exercise; on the last
    /// exercise of a non-final series, series completion runs automatically;
    /// on the last exercise of the final series the cursor stays put.
    /// Completing an already-completed exercise again is a no-op on the
    /// completion set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveExercise` without mutating any state
    /// when the cursor has no exercise under it.
    pub fn complete_exercise(&mut self) -> Result<ExerciseOutcome, SessionError> {
        let Some(id) = self
            .session
            .complete_exercise_at(self.current_series, self.current_exercise)
        else {
            return Err(SessionError::NoActiveExercise);
        };
        self.completed_exercises.insert(id);

        if !self.is_last_exercise() {
            self.current_exercise += 1;
            Ok(ExerciseOutcome::Advanced)
        } else if !self.is_last_series() {
            let outcome = self.complete_series()?;
            Ok(ExerciseOutcome::SeriesCompleted(outcome))
        } else {
            Ok(ExerciseOutcome::SessionComplete)
        }
    }

    /// Complete the active series and move to the next one.
    ///
    /// Resets the exercise cursor to the top of the target series. On the
    /// final series the cursor stays where it is; the series is merely
    /// flagged complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSeries` without mutating any state
    /// when the cursor has no series under it.
    pub fn complete_series(&mut self) -> Result<SeriesOutcome, SessionError> {
        let Some(id) = self.session.complete_series_at(self.current_series) else {
            return Err(SessionError::NoActiveSeries);
        };
        self.completed_series.insert(id);
        self.current_exercise = 0;

        if self.is_last_series() {
            return Ok(SeriesOutcome::AllComplete);
        }

        self.current_series += 1;
        let series_name = self
            .active_series()
            .map(|s| s.name().to_owned())
            .unwrap_or_default();
        Ok(SeriesOutcome::AdvancedToNext { series_name })
    }

    /// Advance the cursor without marking anything complete.
    ///
    /// Moves to the next exercise in the active series, else to the top of
    /// the next series, else stays put (no wraparound). Returns whether the
    /// cursor moved.
    pub fn skip_exercise(&mut self) -> bool {
        let Some(series) = self.active_series() else {
            return false;
        };

        if self.current_exercise + 1 < series.exercise_count() {
            self.current_exercise += 1;
            true
        } else if !self.is_last_series() {
            self.current_series += 1;
            self.current_exercise = 0;
            true
        } else {
            false
        }
    }

    /// Alias for `skip_exercise`; never marks completion.
    pub fn next_exercise(&mut self) -> bool {
        self.skip_exercise()
    }

    /// Step the cursor backwards.
    ///
    /// Moves to the previous exercise in the active series, else to the last
    /// exercise of the previous series. At the first exercise of the first
    /// series this is a no-op. Returns whether the cursor moved.
    pub fn previous_exercise(&mut self) -> bool {
        if self.current_exercise > 0 {
            self.current_exercise -= 1;
            true
        } else if self.current_series > 0 {
            self.current_series -= 1;
            self.current_exercise = self
                .active_series()
                .map(|s| s.exercise_count().saturating_sub(1))
                .unwrap_or(0);
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTracker")
            .field("session_id", &self.session.id())
            .field("current_series", &self.current_series)
            .field("current_exercise", &self.current_exercise)
            .field("completed_exercises_len", &self.completed_exercises.len())
            .field("completed_series_len", &self.completed_series.len())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
