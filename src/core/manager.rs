//! The roster manager: single owner of the student collection.
//!
//! All reads hand out owned copies of the students, so nothing outside the
//! manager can alter the collection or a record inside it. Mutation goes
//! through the manager's own operations only.

use crate::core::export;
use crate::core::searching::SearchAlgorithm;
use crate::core::sorting::{compare, SortAlgorithm};
use crate::domain::model::{SortKey, SortOrder, Student, StudentData, StudentPatch};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{Result, RosterError};
use crate::utils::monitor::{as_millis_f64, timed};
use crate::utils::validation::validate_registration_code;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How [`RosterManager::update_student`] treats the fields of a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Empty strings and zero scores count as "not supplied".
    #[default]
    SkipBlank,
    /// Every `Some` field is written, including empty strings and 0.0.
    Presence,
}

impl FromStr for UpdatePolicy {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "skip_blank" => Ok(UpdatePolicy::SkipBlank),
            "presence" => Ok(UpdatePolicy::Presence),
            _ => Err(RosterError::UnknownAlgorithmError {
                kind: "update policy".to_string(),
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpdatePolicy::SkipBlank => "skip_blank",
            UpdatePolicy::Presence => "presence",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManagerSettings {
    pub update_policy: UpdatePolicy,
    pub sort_algorithm: SortAlgorithm,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub search_algorithm: SearchAlgorithm,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            update_policy: UpdatePolicy::default(),
            sort_algorithm: SortAlgorithm::Merge,
            sort_key: SortKey::Name,
            sort_order: SortOrder::Asc,
            search_algorithm: SearchAlgorithm::Linear,
        }
    }
}

impl ManagerSettings {
    pub fn from_provider<C: ConfigProvider>(config: &C) -> Self {
        Self {
            update_policy: config.update_policy(),
            sort_algorithm: config.sort_algorithm(),
            sort_key: config.sort_key(),
            sort_order: config.sort_order(),
            search_algorithm: config.search_algorithm(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortOutcome {
    pub records: Vec<Student>,
    pub elapsed: Duration,
    pub algorithm: SortAlgorithm,
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortOutcome {
    pub fn complexity(&self) -> &'static str {
        self.algorithm.complexity()
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_millis_f64(self.elapsed)
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub records: Vec<Student>,
    pub elapsed: Duration,
    pub algorithm: SearchAlgorithm,
    pub query: String,
}

impl SearchOutcome {
    pub fn complexity(&self) -> &'static str {
        self.algorithm.complexity()
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_millis_f64(self.elapsed)
    }
}

/// Opaque identifier derived from the current time in milliseconds.
pub fn generate_student_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

#[derive(Debug, Clone, Default)]
pub struct RosterManager {
    students: Vec<Student>,
    settings: ManagerSettings,
}

impl RosterManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ManagerSettings) -> Self {
        Self {
            students: Vec::new(),
            settings,
        }
    }

    /// Seed a manager with an initial collection, keeping the given order.
    /// Like an import, seeding does not validate registration codes.
    pub fn with_students<I>(settings: ManagerSettings, students: I) -> Self
    where
        I: IntoIterator<Item = StudentData>,
    {
        Self {
            students: students.into_iter().map(Student::from).collect(),
            settings,
        }
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Owned copies of the collection in its current order.
    pub fn students(&self) -> Vec<Student> {
        self.students.clone()
    }

    pub fn find_student(&self, id: &str) -> Option<Student> {
        self.students.iter().find(|s| s.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn add_student(&mut self, data: StudentData) -> Result<Student> {
        validate_registration_code("code", &data.code)?;

        let student = Student::new(data);
        tracing::debug!("Adding student {} ({})", student.id(), student.code());
        self.students.push(student.clone());
        Ok(student)
    }

    /// Apply `patch` to the first student with `id`. Under
    /// [`UpdatePolicy::SkipBlank`] blank values in the patch are ignored.
    pub fn update_student(&mut self, id: &str, patch: StudentPatch) -> Result<Student> {
        let patch = match self.settings.update_policy {
            UpdatePolicy::SkipBlank => {
                let kept = patch.clone().without_blanks();
                if kept != patch {
                    tracing::warn!("Ignoring blank fields in update for student {}", id);
                }
                kept
            }
            UpdatePolicy::Presence => patch,
        };

        let student = self
            .students
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| RosterError::NotFoundError { id: id.to_string() })?;

        patch.apply_to(student);
        tracing::debug!("Updated student {}", id);
        Ok(student.clone())
    }

    /// Remove every student with `id` and return how many were removed.
    /// A missing id is a no-op.
    pub fn delete_student(&mut self, id: &str) -> usize {
        let before = self.students.len();
        self.students.retain(|s| s.id() != id);
        let removed = before - self.students.len();

        if removed == 0 {
            tracing::warn!("Delete requested for unknown student {}", id);
        } else {
            tracing::debug!("Deleted {} record(s) with id {}", removed, id);
        }
        removed
    }

    /// Sort the collection and make the result its new canonical order.
    pub fn reorder_by(
        &mut self,
        algorithm: SortAlgorithm,
        key: SortKey,
        order: SortOrder,
    ) -> SortOutcome {
        let outcome = self.sorted_view(algorithm, key, order);
        self.students = outcome.records.clone();

        tracing::info!(
            "🔀 Reordered {} students by {} {} using {} sort in {:.3} ms ({})",
            outcome.records.len(),
            key,
            order,
            algorithm,
            outcome.elapsed_ms(),
            outcome.complexity()
        );
        outcome
    }

    /// Same as [`RosterManager::reorder_by`] but leaves the collection untouched.
    pub fn sorted_view(&self, algorithm: SortAlgorithm, key: SortKey, order: SortOrder) -> SortOutcome {
        let mut records = self.students.clone();
        let ((), elapsed) = timed(|| {
            algorithm.sort_by(&mut records, |a, b| compare(a, b, key, order));
        });

        SortOutcome {
            records,
            elapsed,
            algorithm,
            key,
            order,
        }
    }

    /// Search never changes the collection. For binary search the
    /// name-sorted copy is scratch and is discarded afterwards.
    pub fn search(&self, query: &str, algorithm: SearchAlgorithm) -> SearchOutcome {
        let (records, elapsed) = timed(|| algorithm.run(&self.students, query));

        tracing::info!(
            "🔍 {} search for '{}' found {} match(es) in {:.3} ms ({})",
            algorithm,
            query,
            records.len(),
            as_millis_f64(elapsed),
            algorithm.complexity()
        );

        SearchOutcome {
            records,
            elapsed,
            algorithm,
            query: query.to_string(),
        }
    }

    pub fn save_to_json(&self) -> Result<String> {
        export::render_json(&self.students)
    }

    /// Replace the whole collection with the parsed snapshot. On error the
    /// current collection is kept. Registration codes are not re-validated.
    pub fn load_from_json(&mut self, text: &str) -> Result<usize> {
        let students = export::parse_json(text)?;
        tracing::info!(
            "📥 Loaded {} students (replacing {})",
            students.len(),
            self.students.len()
        );
        self.students = students;
        Ok(self.students.len())
    }

    pub fn export_csv(&self) -> Result<String> {
        export::render_csv(&self.students)
    }

    pub fn save_to_storage<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let json = self.save_to_json()?;
        storage.write_file(path, json.as_bytes())?;
        tracing::info!("💾 Saved {} students to {}", self.students.len(), path);
        Ok(())
    }

    pub fn load_from_storage<S: Storage>(&mut self, storage: &S, path: &str) -> Result<usize> {
        let bytes = storage.read_file(path)?;
        let text = String::from_utf8(bytes).map_err(|e| RosterError::FormatError {
            message: format!("snapshot {} is not valid UTF-8: {}", path, e),
        })?;
        self.load_from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn data(id: &str, name: &str, code: &str, score: f64) -> StudentData {
        StudentData {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
            category: "Informatics".to_string(),
            score,
        }
    }

    fn manager() -> RosterManager {
        RosterManager::with_students(
            ManagerSettings::default(),
            vec![
                data("1", "Bob", "300", 1.0),
                data("2", "Alice", "100", 4.0),
                data("3", "Carol", "200", 2.5),
            ],
        )
    }

    struct MemoryStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                files: RefCell::new(HashMap::new()),
            }
        }
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                RosterError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_add_student_validates_code() {
        let mut roster = manager();
        let err = roster.add_student(data("4", "Dan", "12a34", 3.0)).unwrap_err();
        assert!(matches!(err, RosterError::ValidationError { .. }));
        assert_eq!(roster.len(), 3);

        roster.add_student(data("4", "Dan", "12345", 3.0)).unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.students()[3].code(), "12345");
    }

    #[test]
    fn test_add_student_allows_duplicate_ids() {
        let mut roster = manager();
        roster.add_student(data("1", "Bob Again", "301", 1.5)).unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.delete_student("1"), 2);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_students_returns_owned_copies() {
        let roster = manager();
        let mut copy = roster.students();
        copy[0].set_name("Mallory");
        copy.clear();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.students()[0].name(), "Bob");
    }

    #[test]
    fn test_update_student_skip_blank_policy() {
        let mut roster = manager();
        let updated = roster
            .update_student(
                "2",
                StudentPatch {
                    name: Some("Alicia".to_string()),
                    category: Some(String::new()),
                    score: Some(0.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name(), "Alicia");
        assert_eq!(updated.category(), "Informatics");
        assert_eq!(updated.score(), 4.0);
    }

    #[test]
    fn test_update_student_presence_policy() {
        let settings = ManagerSettings {
            update_policy: UpdatePolicy::Presence,
            ..Default::default()
        };
        let mut roster = RosterManager::with_students(settings, vec![data("1", "Bob", "300", 1.0)]);
        let updated = roster
            .update_student(
                "1",
                StudentPatch {
                    category: Some(String::new()),
                    score: Some(0.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name(), "Bob");
        assert_eq!(updated.category(), "");
        assert_eq!(updated.score(), 0.0);
    }

    #[test]
    fn test_update_missing_student_is_not_found() {
        let mut roster = manager();
        let err = roster
            .update_student("missing", StudentPatch::default())
            .unwrap_err();
        assert!(matches!(err, RosterError::NotFoundError { id } if id == "missing"));
    }

    #[test]
    fn test_delete_missing_student_is_noop() {
        let mut roster = manager();
        let before = roster.students();
        assert_eq!(roster.delete_student("nope"), 0);
        assert_eq!(roster.students(), before);
    }

    #[test]
    fn test_reorder_by_replaces_order() {
        let mut roster = manager();
        let outcome = roster.reorder_by(SortAlgorithm::Merge, SortKey::Score, SortOrder::Desc);
        let scores: Vec<f64> = outcome.records.iter().map(|s| s.score()).collect();
        assert_eq!(scores, vec![4.0, 2.5, 1.0]);
        assert_eq!(roster.students(), outcome.records);
        assert_eq!(outcome.complexity(), "O(n log n)");
    }

    #[test]
    fn test_sorted_view_is_pure() {
        let roster = manager();
        let outcome = roster.sorted_view(SortAlgorithm::Bubble, SortKey::Name, SortOrder::Asc);
        let names: Vec<&str> = outcome.records.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(roster.students()[0].name(), "Bob");
    }

    #[test]
    fn test_binary_search_does_not_persist_scratch_order() {
        let roster = manager();
        let outcome = roster.search("alice", SearchAlgorithm::Binary);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id(), "2");
        assert_eq!(roster.students()[0].id(), "1");
    }

    #[test]
    fn test_failed_load_keeps_collection() {
        let mut roster = manager();
        let err = roster.load_from_json("{ not json").unwrap_err();
        assert!(matches!(err, RosterError::FormatError { .. }));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_load_skips_code_validation() {
        let mut roster = RosterManager::new();
        let loaded = roster
            .load_from_json(
                r#"[{"id": "x", "name": "Xavier", "code": "A-1", "category": "", "score": 1.5}]"#,
            )
            .unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(roster.students()[0].code(), "A-1");
    }

    #[test]
    fn test_storage_round_trip() {
        let storage = MemoryStorage::new();
        let roster = manager();
        roster.save_to_storage(&storage, "roster.json").unwrap();

        let mut restored = RosterManager::new();
        assert_eq!(restored.load_from_storage(&storage, "roster.json").unwrap(), 3);
        assert_eq!(restored.students(), roster.students());
        assert!(restored.load_from_storage(&storage, "other.json").is_err());
    }

    #[test]
    fn test_generate_student_id_is_numeric() {
        let id = generate_student_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_parse_update_policy() {
        assert_eq!("skip-blank".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::SkipBlank);
        assert_eq!("Presence".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Presence);
        assert!("merge".parse::<UpdatePolicy>().is_err());
    }
}
