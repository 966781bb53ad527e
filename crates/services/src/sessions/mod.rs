mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{ExerciseOutcome, SeriesOutcome, SessionTracker};
pub use view::SessionViewState;
pub use workflow::{SaveListener, SessionAnswerResult, SessionLoopService};
