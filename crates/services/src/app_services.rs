use std::sync::Arc;

use storage::repository::Storage;
use storage::rest::{RestClient, RestConfig};

use crate::Clock;
use crate::branding_service::BrandingService;
use crate::error::AppServicesError;
use crate::plan_service::PlanService;
use crate::sessions::SessionLoopService;

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    session_loop: Arc<SessionLoopService>,
    plan_service: Arc<PlanService>,
    branding: Arc<BrandingService>,
}

impl AppServices {
    /// Build services backed by the hosted backend's REST interface.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Rest` if the client cannot be constructed.
    pub fn new_rest(config: &RestConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let client = RestClient::connect(config)?;
        Ok(Self::from_storage(Storage::rest(client), clock))
    }

    /// Build services over in-memory storage, for tests and prototyping.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock) -> Self {
        let session_loop = Arc::new(SessionLoopService::new(
            clock,
            Arc::clone(&storage.sessions),
        ));
        let plan_service = Arc::new(PlanService::new(clock, Arc::clone(&storage.plans)));
        let branding = Arc::new(BrandingService::new(Arc::clone(&storage.branding)));

        Self {
            session_loop,
            plan_service,
            branding,
        }
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    #[must_use]
    pub fn plan_service(&self) -> Arc<PlanService> {
        Arc::clone(&self.plan_service)
    }

    #[must_use]
    pub fn branding(&self) -> Arc<BrandingService> {
        Arc::clone(&self.branding)
    }
}
