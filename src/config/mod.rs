pub mod planner;

pub use planner::{get_planner_config, load_config_from, LogFormat, PlannerConfig};
