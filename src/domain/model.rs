use crate::utils::error::RosterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plain data bag for one student. This is both the construction input of
/// [`Student`] and the shape of each entry in an exported snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentData {
    pub id: String,
    pub name: String,
    pub code: String,
    pub category: String,
    pub score: f64,
}

/// A student profile. The identifier is fixed at construction, every other
/// field can be changed through its setter. No validation happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: String,
    name: String,
    code: String,
    category: String,
    score: f64,
}

impl Student {
    pub fn new(data: StudentData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            code: data.code,
            category: data.category,
            score: data.score,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub fn to_data(&self) -> StudentData {
        StudentData {
            id: self.id.clone(),
            name: self.name.clone(),
            code: self.code.clone(),
            category: self.category.clone(),
            score: self.score,
        }
    }
}

impl From<StudentData> for Student {
    fn from(data: StudentData) -> Self {
        Student::new(data)
    }
}

impl From<&Student> for StudentData {
    fn from(student: &Student) -> Self {
        student.to_data()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {}) {:.2}",
            self.id, self.name, self.code, self.category, self.score
        )
    }
}

/// Partial update for [`Student`]; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub score: Option<f64>,
}

impl StudentPatch {
    /// Drops empty strings and zero scores, so only "truthy" values remain.
    pub fn without_blanks(self) -> Self {
        Self {
            name: self.name.filter(|v| !v.is_empty()),
            code: self.code.filter(|v| !v.is_empty()),
            category: self.category.filter(|v| !v.is_empty()),
            score: self.score.filter(|v| *v != 0.0 && !v.is_nan()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.code.is_none() && self.category.is_none() && self.score.is_none()
    }

    pub(crate) fn apply_to(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.set_name(name);
        }
        if let Some(code) = self.code {
            student.set_code(code);
        }
        if let Some(category) = self.category {
            student.set_category(category);
        }
        if let Some(score) = self.score {
            student.set_score(score);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Code,
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "code" | "nim" => Ok(SortKey::Code),
            "score" | "gpa" => Ok(SortKey::Score),
            _ => Err(RosterError::UnknownAlgorithmError {
                kind: "sort key".to_string(),
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Name => "name",
            SortKey::Code => "code",
            SortKey::Score => "score",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOrder {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(RosterError::UnknownAlgorithmError {
                kind: "sort order".to_string(),
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}
