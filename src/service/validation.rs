//! User schema rules and request validation.

use crate::error::AppError;
use crate::model::{CreateUserRequest, NewUser, UserPatch};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("email pattern compiles"));

/// Per-field rule. Normalization (trim, lowercase) runs before the checks.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub trim: bool,
    pub lowercase: bool,
    pub min_length: Option<usize>,
    pub format: Option<&'static str>,
}

pub const NAME: FieldRule = FieldRule {
    field: "name",
    trim: true,
    lowercase: false,
    min_length: None,
    format: None,
};

pub const EMAIL: FieldRule = FieldRule {
    field: "email",
    trim: false,
    lowercase: true,
    min_length: None,
    format: Some("email"),
};

pub const PASSWORD: FieldRule = FieldRule {
    field: "password",
    trim: false,
    lowercase: false,
    min_length: Some(6),
    format: None,
};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. All fields are required.
    pub fn validate_create(body: CreateUserRequest) -> Result<NewUser, AppError> {
        Ok(NewUser {
            name: required(&NAME, body.name)?,
            email: required(&EMAIL, body.email)?,
            password: required(&PASSWORD, body.password)?,
        })
    }

    /// Validate only the fields present in a patch. A supplied field must
    /// still satisfy its rule, so an empty name is rejected.
    pub fn validate_patch(patch: UserPatch) -> Result<UserPatch, AppError> {
        Ok(UserPatch {
            name: patch.name.map(|v| checked(&NAME, v)).transpose()?,
            email: patch.email.map(|v| checked(&EMAIL, v)).transpose()?,
        })
    }
}

fn required(rule: &FieldRule, value: Option<String>) -> Result<String, AppError> {
    let value = value.ok_or_else(|| required_error(rule))?;
    checked(rule, value)
}

fn required_error(rule: &FieldRule) -> AppError {
    AppError::Validation(format!("{} is required", rule.field))
}

fn checked(rule: &FieldRule, value: String) -> Result<String, AppError> {
    let value = normalize(rule, value);
    if value.is_empty() {
        return Err(required_error(rule));
    }
    if let Some(min) = rule.min_length {
        if value.chars().count() < min {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                rule.field, min
            )));
        }
    }
    if let Some(format) = rule.format {
        validate_format(rule.field, &value, format)?;
    }
    Ok(value)
}

fn normalize(rule: &FieldRule, value: String) -> String {
    let value = if rule.trim { value.trim().to_string() } else { value };
    if rule.lowercase {
        value.to_lowercase()
    } else {
        value
    }
}

fn validate_format(field: &str, value: &str, format: &str) -> Result<(), AppError> {
    match format {
        "email" => {
            if !EMAIL_PATTERN.is_match(value) {
                return Err(AppError::Validation(format!("{} must be a valid email", field)));
            }
        }
        _ => {}
    }
    Ok(())
}
