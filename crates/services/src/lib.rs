#![forbid(unsafe_code)]

pub mod app_services;
pub mod branding_service;
pub mod error;
pub mod plan_service;
pub mod sessions;

pub use coach_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use branding_service::BrandingService;
pub use error::{AppServicesError, BrandingServiceError, PlanServiceError, SessionError};
pub use plan_service::PlanService;

pub use sessions::{
    ExerciseOutcome, SaveListener, SeriesOutcome, SessionAnswerResult, SessionLoopService,
    SessionProgress, SessionTracker, SessionViewState,
};
