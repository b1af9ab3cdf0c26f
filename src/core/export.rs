use crate::domain::model::{Student, StudentData};
use crate::utils::error::{Result, RosterError};

pub const CSV_HEADER: &str = "id,name,code,category,score";

/// Serialize students, in order, as a JSON array of data bags.
/// JSON has no representation for NaN or infinity, so a non-finite score is
/// rejected instead of being written as `null`.
pub fn render_json(students: &[Student]) -> Result<String> {
    if let Some(student) = students.iter().find(|s| !s.score().is_finite()) {
        return Err(RosterError::FormatError {
            message: format!(
                "student {} has a non-finite score ({}) that JSON cannot represent",
                student.id(),
                student.score()
            ),
        });
    }
    let bags: Vec<StudentData> = students.iter().map(Student::to_data).collect();
    Ok(serde_json::to_string_pretty(&bags)?)
}

/// Parse a JSON array of data bags. Any syntax or shape problem is a
/// [`RosterError::FormatError`].
pub fn parse_json(text: &str) -> Result<Vec<Student>> {
    let bags: Vec<StudentData> = serde_json::from_str(text)?;
    Ok(bags.into_iter().map(Student::from).collect())
}

pub fn render_csv(students: &[Student]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for student in students {
        writer.serialize(student.to_data())?;
    }
    if students.is_empty() {
        writer.write_record(CSV_HEADER.split(','))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RosterError::FormatError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
