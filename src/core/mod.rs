pub mod export;
pub mod manager;
pub mod searching;
pub mod sorting;

pub use crate::domain::model::{SortKey, SortOrder, Student, StudentData, StudentPatch};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
