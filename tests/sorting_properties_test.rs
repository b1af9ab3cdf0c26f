use std::cmp::Ordering;
use std::collections::HashMap;
use student_roster::core::sorting::compare;
use student_roster::{
    ManagerSettings, RosterManager, SortAlgorithm, SortKey, SortOrder, Student, StudentData,
};

const KEYS: [SortKey; 3] = [SortKey::Name, SortKey::Code, SortKey::Score];
const ORDERS: [SortOrder; 2] = [SortOrder::Asc, SortOrder::Desc];

/// 產生可重現的測試資料（含大量重複鍵值）
fn roster_data(n: usize) -> Vec<StudentData> {
    let names = ["Alice", "bob", "Carol", "Dave", "alice", "Eve"];
    let mut val: u32 = 42;
    (0..n)
        .map(|i| {
            val = val.wrapping_mul(1103515245).wrapping_add(12345);
            StudentData {
                id: format!("s{:03}", i),
                name: names[(val % names.len() as u32) as usize].to_string(),
                code: format!("{}", 2020000 + (val % 7)),
                category: "Informatics".to_string(),
                score: ((val >> 8) % 9) as f64 * 0.5,
            }
        })
        .collect()
}

fn ids(students: &[Student]) -> Vec<String> {
    students.iter().map(|s| s.id().to_string()).collect()
}

#[test]
fn test_every_sort_is_an_ordered_permutation() {
    let data = roster_data(40);

    for algorithm in SortAlgorithm::ALL {
        for key in KEYS {
            for order in ORDERS {
                let mut roster = RosterManager::with_students(ManagerSettings::default(), data.clone());
                let outcome = roster.reorder_by(algorithm, key, order);

                let mut expected_ids: Vec<String> = data.iter().map(|d| d.id.clone()).collect();
                let mut actual_ids = ids(&outcome.records);
                expected_ids.sort();
                actual_ids.sort();
                assert_eq!(actual_ids, expected_ids, "{} {} {} lost records", algorithm, key, order);

                assert!(
                    outcome
                        .records
                        .windows(2)
                        .all(|w| compare(&w[0], &w[1], key, order) != Ordering::Greater),
                    "{} {} {} is out of order",
                    algorithm,
                    key,
                    order
                );
            }
        }
    }
}

#[test]
fn test_sorting_twice_is_idempotent() {
    let data = roster_data(25);

    for algorithm in SortAlgorithm::ALL {
        for key in KEYS {
            for order in ORDERS {
                let mut roster = RosterManager::with_students(ManagerSettings::default(), data.clone());
                let first = roster.reorder_by(algorithm, key, order);
                let second = roster.reorder_by(algorithm, key, order);
                assert_eq!(ids(&first.records), ids(&second.records), "{} {} {}", algorithm, key, order);
            }
        }
    }
}

#[test]
fn test_stable_sorts_keep_equal_keys_in_input_order() {
    let data = roster_data(30);
    let position: HashMap<String, usize> = data
        .iter()
        .enumerate()
        .map(|(i, d)| (d.id.clone(), i))
        .collect();

    for algorithm in SortAlgorithm::ALL.into_iter().filter(|a| a.is_stable()) {
        for key in KEYS {
            for order in ORDERS {
                let roster = RosterManager::with_students(ManagerSettings::default(), data.clone());
                let outcome = roster.sorted_view(algorithm, key, order);

                for pair in outcome.records.windows(2) {
                    if compare(&pair[0], &pair[1], key, order) == Ordering::Equal {
                        assert!(
                            position[pair[0].id()] < position[pair[1].id()],
                            "{} {} {} reordered equal keys",
                            algorithm,
                            key,
                            order
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_merge_sort_scores_descending() {
    let data = [1.0, 4.0, 2.5]
        .iter()
        .enumerate()
        .map(|(i, score)| StudentData {
            id: i.to_string(),
            name: format!("Student {}", i),
            code: format!("{}", 100 + i),
            category: String::new(),
            score: *score,
        });
    let mut roster = RosterManager::with_students(ManagerSettings::default(), data);

    let outcome = roster.reorder_by(SortAlgorithm::Merge, SortKey::Score, SortOrder::Desc);

    let scores: Vec<f64> = outcome.records.iter().map(|s| s.score()).collect();
    assert_eq!(scores, vec![4.0, 2.5, 1.0]);
    assert!(outcome.elapsed_ms() >= 0.0);
    let persisted: Vec<f64> = roster.students().iter().map(|s| s.score()).collect();
    assert_eq!(persisted, scores);
}

#[test]
fn test_names_sort_lexicographically() {
    let data = ["bob", "Alice", "alice", "Bob"].iter().enumerate().map(|(i, name)| StudentData {
        id: i.to_string(),
        name: name.to_string(),
        code: "1".to_string(),
        category: String::new(),
        score: 0.0,
    });
    let roster = RosterManager::with_students(ManagerSettings::default(), data);

    for algorithm in SortAlgorithm::ALL {
        let outcome = roster.sorted_view(algorithm, SortKey::Name, SortOrder::Asc);
        let names: Vec<&str> = outcome.records.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "alice", "bob"], "{}", algorithm);
    }
}
