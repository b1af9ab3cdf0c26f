use crate::core::sorting::SortAlgorithm;
use crate::domain::model::Student;
use crate::utils::error::RosterError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    #[serde(alias = "sequential")]
    Linear,
    Binary,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 2] = [SearchAlgorithm::Linear, SearchAlgorithm::Binary];

    pub fn name(&self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "linear",
            SearchAlgorithm::Binary => "binary",
        }
    }

    pub fn complexity(&self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "O(n)",
            SearchAlgorithm::Binary => "O(log n)",
        }
    }

    /// Runs the search over `students` in their current order.
    /// Binary search first sorts a scratch copy by lowercase name; `students`
    /// is left as is.
    pub fn run(&self, students: &[Student], query: &str) -> Vec<Student> {
        match self {
            SearchAlgorithm::Linear => linear_search(students, query),
            SearchAlgorithm::Binary => {
                let mut by_name = students.to_vec();
                // 以小寫名稱排序，與搜尋時的比較方式一致
                SortAlgorithm::Merge.sort_by(&mut by_name, |a, b| {
                    a.name().to_lowercase().cmp(&b.name().to_lowercase())
                });
                binary_search_by_name(&by_name, query)
                    .map(|index| vec![by_name[index].clone()])
                    .unwrap_or_default()
            }
        }
    }
}

impl FromStr for SearchAlgorithm {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "sequential" => Ok(SearchAlgorithm::Linear),
            "binary" => Ok(SearchAlgorithm::Binary),
            _ => Err(RosterError::UnknownAlgorithmError {
                kind: "search algorithm".to_string(),
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive substring match on name, or case-sensitive substring
/// match on registration code. Relative order is preserved.
pub fn linear_search(students: &[Student], query: &str) -> Vec<Student> {
    let needle = query.to_lowercase();
    students
        .iter()
        .filter(|s| s.name().to_lowercase().contains(&needle) || s.code().contains(query))
        .cloned()
        .collect()
}

/// Classic halving search for an exact, case-insensitive name match.
/// `sorted` must already be ordered by lowercase name ascending. Returns the index of
/// the first match the halving hits, which need not be the only one.
pub fn binary_search_by_name(sorted: &[Student], query: &str) -> Option<usize> {
    let needle = query.to_lowercase();
    let mut low = 0usize;
    let mut high = sorted.len();

    while low < high {
        let mid = low + (high - low) / 2;
        let candidate = sorted[mid].name().to_lowercase();
        match candidate.as_str().cmp(needle.as_str()) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    None
}
