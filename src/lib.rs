pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::storage::LocalStorage;
pub use config::toml_config::RosterConfig;
pub use crate::core::manager::{
    generate_student_id, ManagerSettings, RosterManager, SearchOutcome, SortOutcome, UpdatePolicy,
};
pub use crate::core::searching::SearchAlgorithm;
pub use crate::core::sorting::SortAlgorithm;
pub use domain::model::{SortKey, SortOrder, Student, StudentData, StudentPatch};
pub use utils::error::{Result, RosterError};
