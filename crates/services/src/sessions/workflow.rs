use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use coach_core::model::{SeriesId, SessionExerciseId, SessionId};
use storage::repository::WorkoutSessionRepository;

use super::progress::SessionProgress;
use super::service::{ExerciseOutcome, SeriesOutcome, SessionTracker};
use crate::Clock;
use crate::error::SessionError;

/// Result of completing the active exercise in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswerResult {
    pub outcome: ExerciseOutcome,
    pub progress: SessionProgress,
    pub is_terminal: bool,
}

/// Receives notice of best-effort saves that did not land.
///
/// In-memory state stays authoritative either way; this only exists so a UI
/// can surface a notification.
pub trait SaveListener: Send + Sync {
    fn progress_save_failed(&self, session_id: SessionId, reason: String);
}

/// Orchestrates session load and completion with best-effort persistence.
///
/// Saves are fired and forgotten: they never block navigation and may reach
/// the backend out of order relative to rapid successive completions. That
/// is accepted; the tracker is the source of truth for the session's
/// lifetime.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    sessions: Arc<dyn WorkoutSessionRepository>,
    load_pending: Arc<AtomicBool>,
    save_listener: Option<Arc<dyn SaveListener>>,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn WorkoutSessionRepository>) -> Self {
        Self {
            clock,
            sessions,
            load_pending: Arc::new(AtomicBool::new(false)),
            save_listener: None,
        }
    }

    /// Attach a listener for failed progress saves.
    #[must_use]
    pub fn with_save_listener(mut self, listener: Arc<dyn SaveListener>) -> Self {
        self.save_listener = Some(listener);
        self
    }

    /// Load a session and build its tracker.
    ///
    /// Re-entrant loads on the same service instance are rejected rather
    /// than raced.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::LoadInProgress` if a load is already pending,
    /// `SessionError::NotFound` for an unknown id, `SessionError::Empty` for
    /// a session without series, or `SessionError::Storage` on transport
    /// failures.
    pub async fn start_session(&self, id: SessionId) -> Result<SessionTracker, SessionError> {
        if self.load_pending.swap(true, Ordering::AcqRel) {
            return Err(SessionError::LoadInProgress);
        }
        let loaded = self.sessions.load_session(id).await;
        self.load_pending.store(false, Ordering::Release);

        let session = loaded?.ok_or(SessionError::NotFound)?;
        SessionTracker::new(session, self.clock.now())
    }

    /// Complete the active exercise, then persist progress in the background.
    ///
    /// The background save needs an ambient tokio runtime; without one the
    /// save is skipped and reported like any other failed save. The tracker
    /// transition itself is synchronous either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveExercise` when the cursor has no
    /// exercise under it; the save never surfaces through this result.
    pub fn complete_current(
        &self,
        tracker: &mut SessionTracker,
    ) -> Result<SessionAnswerResult, SessionError> {
        let outcome = tracker.complete_exercise()?;
        self.spawn_save(tracker);

        Ok(SessionAnswerResult {
            outcome,
            progress: tracker.progress(),
            is_terminal: tracker.is_terminal(),
        })
    }

    /// Complete the active series explicitly, then persist in the background.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSeries` when there is no active series.
    pub fn complete_active_series(
        &self,
        tracker: &mut SessionTracker,
    ) -> Result<SeriesOutcome, SessionError> {
        let outcome = tracker.complete_series()?;
        self.spawn_save(tracker);
        Ok(outcome)
    }

    /// Move the cursor forward without completing anything.
    ///
    /// Pure navigation never persists; only completion does. Returns whether
    /// the cursor moved.
    pub fn skip_exercise(&self, tracker: &mut SessionTracker) -> bool {
        tracker.skip_exercise()
    }

    /// Alias for `skip_exercise`.
    pub fn next_exercise(&self, tracker: &mut SessionTracker) -> bool {
        tracker.next_exercise()
    }

    /// Move the cursor backward; a no-op at the first exercise of the first
    /// series. Never persists.
    pub fn previous_exercise(&self, tracker: &mut SessionTracker) -> bool {
        tracker.previous_exercise()
    }

    /// Persist the current completion sets and wait for the result.
    ///
    /// Useful on session exit, where the caller wants to know whether the
    /// final write landed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on transport failures.
    pub async fn save_now(&self, tracker: &SessionTracker) -> Result<bool, SessionError> {
        let (id, exercises, series) = Self::snapshot(tracker);
        let accepted = self.sessions.save_progress(id, &exercises, &series).await?;
        Ok(accepted)
    }

    fn snapshot(
        tracker: &SessionTracker,
    ) -> (SessionId, Vec<SessionExerciseId>, Vec<SeriesId>) {
        let id = tracker.session().id();
        let exercises = tracker.completed_exercises().iter().copied().collect();
        let series = tracker.completed_series().iter().copied().collect();
        (id, exercises, series)
    }

    fn spawn_save(&self, tracker: &SessionTracker) {
        let (id, exercises, series) = Self::snapshot(tracker);
        let sessions = Arc::clone(&self.sessions);
        let listener = self.save_listener.clone();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            let reason = "no async runtime available for background save".to_owned();
            warn!(session_id = %id, %reason, "progress save failed");
            if let Some(listener) = listener {
                listener.progress_save_failed(id, reason);
            }
            return;
        };

        runtime.spawn(async move {
            let failure = match sessions.save_progress(id, &exercises, &series).await {
                Ok(true) => None,
                Ok(false) => Some("backend did not accept the write".to_owned()),
                Err(error) => Some(error.to_string()),
            };
            if let Some(reason) = failure {
                warn!(session_id = %id, %reason, "progress save failed");
                if let Some(listener) = listener {
                    listener.progress_save_failed(id, reason);
                }
            }
        });
    }
}
