use crate::utils::error::{Result, RosterError};
use regex::Regex;
use std::sync::OnceLock;

/// Registration codes ("NIM") are plain decimal digit strings.
pub const REGISTRATION_CODE_PATTERN: &str = r"^[0-9]+$";

static REGISTRATION_CODE_RE: OnceLock<Regex> = OnceLock::new();

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn registration_code_regex() -> Result<&'static Regex> {
    if let Some(re) = REGISTRATION_CODE_RE.get() {
        return Ok(re);
    }
    let re = Regex::new(REGISTRATION_CODE_PATTERN).map_err(|e| RosterError::ConfigError {
        message: format!("invalid registration code pattern: {}", e),
    })?;
    Ok(REGISTRATION_CODE_RE.get_or_init(|| re))
}

pub fn validate_registration_code(field_name: &str, code: &str) -> Result<()> {
    if registration_code_regex()?.is_match(code) {
        Ok(())
    } else {
        Err(RosterError::ValidationError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Registration code must contain only digits 0-9".to_string(),
        })
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
