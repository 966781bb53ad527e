use coach_core::model::SessionExercise;

use super::progress::SessionProgress;
use super::service::{ExerciseOutcome, SessionTracker};
use crate::error::SessionError;

/// Load state for the session view.
///
/// The view starts in `Loading`, becomes `Ready` once the fetch succeeds, or
/// `Failed` with a display message otherwise. A hung fetch simply stays in
/// `Loading`; there is no tracker-level timeout beyond the transport's own.
#[derive(Debug, Default)]
pub enum SessionViewState {
    #[default]
    Loading,
    Ready(SessionTracker),
    Failed(String),
}

impl SessionViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::Loading
    }

    /// Transition to `Ready` with a loaded tracker.
    pub fn ready(&mut self, tracker: SessionTracker) {
        *self = Self::Ready(tracker);
    }

    /// Transition to `Failed` with a user-facing message.
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Self::Failed(message.into());
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn tracker(&self) -> Option<&SessionTracker> {
        match self {
            Self::Ready(tracker) => Some(tracker),
            _ => None,
        }
    }

    #[must_use]
    pub fn tracker_mut(&mut self) -> Option<&mut SessionTracker> {
        match self {
            Self::Ready(tracker) => Some(tracker),
            _ => None,
        }
    }

    /// Active exercise of the underlying tracker, `None` unless ready.
    #[must_use]
    pub fn active_exercise(&self) -> Option<&SessionExercise> {
        self.tracker().and_then(SessionTracker::active_exercise)
    }

    /// Progress of the underlying tracker, `None` unless ready.
    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.tracker().map(SessionTracker::progress)
    }

    /// Forwarded navigation; a no-op unless ready.
    pub fn skip_exercise(&mut self) -> bool {
        self.tracker_mut()
            .is_some_and(SessionTracker::skip_exercise)
    }

    /// Forwarded navigation; a no-op unless ready.
    pub fn next_exercise(&mut self) -> bool {
        self.tracker_mut()
            .is_some_and(SessionTracker::next_exercise)
    }

    /// Forwarded navigation; a no-op unless ready.
    pub fn previous_exercise(&mut self) -> bool {
        self.tracker_mut()
            .is_some_and(SessionTracker::previous_exercise)
    }

    /// Complete the active exercise; `None` unless ready.
    pub fn complete_exercise(&mut self) -> Option<Result<ExerciseOutcome, SessionError>> {
        self.tracker_mut().map(SessionTracker::complete_exercise)
    }
}
