pub mod brain;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod request;
pub mod service;
pub mod state;
pub mod topics;

pub use brain::{GeneratedTask, PlanEngine, Priority, MAX_TASKS};
pub use error::PlannerError;
pub use request::{ExamStage, PlanRequest, ProficiencyLevel, RequestContext, UserType};
