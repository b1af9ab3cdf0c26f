//! The five classroom sorting algorithms offered by the roster.
//!
//! Every algorithm works on a mutable slice with a caller-supplied comparator
//! so the same code sorts students by any key and in either direction.

use crate::domain::model::{SortKey, SortOrder, Student};
use crate::utils::error::RosterError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Shell,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Shell,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Shell => "shell",
        }
    }

    /// Nominal complexity label displayed next to the timing.
    pub fn complexity(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Insertion => "O(n²)",
            SortAlgorithm::Merge => "O(n log n)",
            SortAlgorithm::Shell => "O(n log² n)",
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            SortAlgorithm::Bubble | SortAlgorithm::Insertion | SortAlgorithm::Merge
        )
    }

    pub fn sort_by<T, F>(&self, items: &mut [T], mut cmp: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            SortAlgorithm::Bubble => bubble_sort(items, &mut cmp),
            SortAlgorithm::Selection => selection_sort(items, &mut cmp),
            SortAlgorithm::Insertion => insertion_sort(items, &mut cmp),
            SortAlgorithm::Merge => merge_sort(items, &mut cmp),
            SortAlgorithm::Shell => shell_sort(items, &mut cmp),
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| RosterError::UnknownAlgorithmError {
                kind: "sort algorithm".to_string(),
                name: s.to_string(),
            })
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compares two students on `key`, reversed for [`SortOrder::Desc`].
/// Strings compare lexicographically, scores numerically.
pub fn compare(a: &Student, b: &Student, key: SortKey, order: SortOrder) -> Ordering {
    let ordering = match key {
        SortKey::Name => a.name().cmp(b.name()),
        SortKey::Code => a.code().cmp(b.code()),
        SortKey::Score => a.score().total_cmp(&b.score()),
    };
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

pub fn bubble_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for i in 0..n - 1 - pass {
            // 只在嚴格大於時交換，保持穩定
            if cmp(&items[i], &items[i + 1]) == Ordering::Greater {
                items.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

pub fn selection_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for i in 0..n {
        let mut min_index = i;
        for j in (i + 1)..n {
            if cmp(&items[j], &items[min_index]) == Ordering::Less {
                min_index = j;
            }
        }
        if min_index != i {
            items.swap(i, min_index);
        }
    }
}

pub fn insertion_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    gapped_insertion_sort(items, 1, cmp);
}

/// Gap sequence n/2, n/4, ..., 1.
pub fn shell_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut gap = items.len() / 2;
    while gap > 0 {
        gapped_insertion_sort(items, gap, cmp);
        gap /= 2;
    }
}

fn gapped_insertion_sort<T, F>(items: &mut [T], gap: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in gap..items.len() {
        let mut j = i;
        while j >= gap && cmp(&items[j - gap], &items[j]) == Ordering::Greater {
            items.swap(j - gap, j);
            j -= gap;
        }
    }
}

pub fn merge_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort(&mut items[..mid], cmp);
    merge_sort(&mut items[mid..], cmp);

    let merged = merge(&items[..mid], &items[mid..], cmp);
    items.clone_from_slice(&merged);
}

fn merge<T, F>(left: &[T], right: &[T], cmp: &mut F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // 相等時取左邊元素
        if cmp(&left[i], &right[j]) != Ordering::Greater {
            merged.push(left[i].clone());
            i += 1;
        } else {
            merged.push(right[j].clone());
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrambled() -> Vec<i32> {
        vec![5, -3, 9, 0, 9, 2, -3, 7, 1, 8, 4, 6]
    }

    #[test]
    fn test_every_algorithm_sorts_integers() {
        let mut expected = scrambled();
        expected.sort();

        for algorithm in SortAlgorithm::ALL {
            let mut items = scrambled();
            algorithm.sort_by(&mut items, |a, b| a.cmp(b));
            assert_eq!(items, expected, "{} produced wrong order", algorithm);
        }
    }

    #[test]
    fn test_every_algorithm_handles_trivial_inputs() {
        for algorithm in SortAlgorithm::ALL {
            let mut empty: Vec<i32> = Vec::new();
            algorithm.sort_by(&mut empty, |a, b| a.cmp(b));
            assert!(empty.is_empty());

            let mut single = vec![42];
            algorithm.sort_by(&mut single, |a, b| a.cmp(b));
            assert_eq!(single, vec![42]);
        }
    }

    #[test]
    fn test_reverse_comparator_sorts_descending() {
        for algorithm in SortAlgorithm::ALL {
            let mut items = scrambled();
            algorithm.sort_by(&mut items, |a, b| b.cmp(a));
            assert!(items.windows(2).all(|w| w[0] >= w[1]), "{}", algorithm);
        }
    }

    #[test]
    fn test_stable_algorithms_keep_tie_order() {
        let pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e'), (2, 'f')];
        for algorithm in SortAlgorithm::ALL.into_iter().filter(|a| a.is_stable()) {
            let mut items = pairs.clone();
            algorithm.sort_by(&mut items, |a, b| a.0.cmp(&b.0));
            let tags: Vec<char> = items.iter().map(|p| p.1).collect();
            assert_eq!(tags, vec!['e', 'b', 'd', 'a', 'c', 'f'], "{}", algorithm);
        }
    }

    #[test]
    fn test_shell_sort_uses_halving_gaps() {
        let mut items: Vec<i32> = (0..33).rev().collect();
        shell_sort(&mut items, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(items, (0..33).collect::<Vec<_>>());
    }

    #[test]
    fn test_parse_and_metadata() {
        assert_eq!("Merge".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Merge);
        assert!("quick".parse::<SortAlgorithm>().is_err());
        assert_eq!(SortAlgorithm::Merge.complexity(), "O(n log n)");
        assert_eq!(SortAlgorithm::Bubble.complexity(), "O(n²)");
        assert!(!SortAlgorithm::Selection.is_stable());
        assert!(!SortAlgorithm::Shell.is_stable());
    }

    #[test]
    fn test_compare_score_desc() {
        let low = Student::new(crate::domain::model::StudentData {
            id: "1".to_string(),
            name: "A".to_string(),
            code: "1".to_string(),
            category: String::new(),
            score: 1.0,
        });
        let mut high = low.clone();
        high.set_score(4.0);

        assert_eq!(compare(&low, &high, SortKey::Score, SortOrder::Asc), Ordering::Less);
        assert_eq!(compare(&low, &high, SortKey::Score, SortOrder::Desc), Ordering::Greater);
        assert_eq!(compare(&low, &low, SortKey::Name, SortOrder::Desc), Ordering::Equal);
    }
}
