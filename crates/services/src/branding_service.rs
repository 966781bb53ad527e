use std::sync::{Arc, Mutex, MutexGuard};

use coach_core::model::{TrainerBranding, TrainerId};
use storage::repository::BrandingRepository;

use crate::error::BrandingServiceError;

/// Explicit theming context for client-facing views.
///
/// The current branding is an owned value with load/apply/reset operations;
/// views read it through `current()` rather than any ambient session-wide
/// storage.
#[derive(Clone)]
pub struct BrandingService {
    repo: Arc<dyn BrandingRepository>,
    current: Arc<Mutex<TrainerBranding>>,
}

impl BrandingService {
    #[must_use]
    pub fn new(repo: Arc<dyn BrandingRepository>) -> Self {
        Self {
            repo,
            current: Arc::new(Mutex::new(TrainerBranding::default_theme())),
        }
    }

    fn guard(&self) -> MutexGuard<'_, TrainerBranding> {
        // branding is plain data; recover the value on poison
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Fetch a trainer's branding and apply it.
    ///
    /// Falls back to the default theme when the trainer has none configured.
    /// Returns the branding now in effect.
    ///
    /// # Errors
    ///
    /// Returns `BrandingServiceError::Storage` if the fetch fails; the
    /// current branding is left untouched in that case.
    pub async fn load(&self, trainer: TrainerId) -> Result<TrainerBranding, BrandingServiceError> {
        let branding = self
            .repo
            .get_branding(trainer)
            .await?
            .unwrap_or_else(TrainerBranding::default_theme);
        self.apply(branding.clone());
        Ok(branding)
    }

    /// Apply the given branding to subsequent `current()` reads.
    pub fn apply(&self, branding: TrainerBranding) {
        *self.guard() = branding;
    }

    /// Restore the default theme.
    pub fn reset(&self) {
        *self.guard() = TrainerBranding::default_theme();
    }

    /// The branding currently in effect.
    #[must_use]
    pub fn current(&self) -> TrainerBranding {
        self.guard().clone()
    }
}
