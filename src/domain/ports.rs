use crate::core::manager::UpdatePolicy;
use crate::core::searching::SearchAlgorithm;
use crate::core::sorting::SortAlgorithm;
use crate::domain::model::{SortKey, SortOrder};
use crate::utils::error::Result;

/// Byte store for roster snapshots. The manager never touches the filesystem
/// directly; callers hand it a storage backend instead.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn snapshot_path(&self) -> &str;
    fn update_policy(&self) -> UpdatePolicy;
    fn sort_algorithm(&self) -> SortAlgorithm;
    fn sort_key(&self) -> SortKey;
    fn sort_order(&self) -> SortOrder;
    fn search_algorithm(&self) -> SearchAlgorithm;
}
