use crate::core::score::{HealthAssessmentInput, KNOWN_CONDITIONS};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const AGE_RANGE: RangeInclusive<u32> = 1..=120;
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 50.0..=250.0;
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 20.0..=300.0;
pub const LEVEL_RANGE: RangeInclusive<u8> = 1..=10;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be a number (got `{value}`)")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Questionnaire answers as typed into the form, before any coercion.
/// Answer files may hold numbers either quoted or bare.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnswers {
    #[serde(deserialize_with = "text_or_number")]
    pub age: String,
    #[serde(alias = "height", deserialize_with = "text_or_number")]
    pub height_cm: String,
    #[serde(alias = "weight", deserialize_with = "text_or_number")]
    pub weight_kg: String,
    #[serde(deserialize_with = "text_or_number")]
    pub fitness_level: String,
    #[serde(deserialize_with = "text_or_number")]
    pub experience_level: String,
    pub has_heart_conditions: bool,
    pub has_respiratory_conditions: bool,
    pub has_mobility_issues: bool,
    pub medical_conditions: Vec<String>,
}

impl RawAnswers {
    pub fn validate(&self) -> Result<HealthAssessmentInput, ValidationError> {
        let age = parse_in_range("age", &self.age, AGE_RANGE)?;
        let height_cm = parse_in_range("height_cm", &self.height_cm, HEIGHT_RANGE_CM)?;
        let weight_kg = parse_in_range("weight_kg", &self.weight_kg, WEIGHT_RANGE_KG)?;
        let fitness_level = parse_in_range("fitness_level", &self.fitness_level, LEVEL_RANGE)?;
        let experience_level =
            parse_in_range("experience_level", &self.experience_level, LEVEL_RANGE)?;

        Ok(HealthAssessmentInput {
            age,
            height_cm,
            weight_kg,
            fitness_level,
            experience_level,
            has_heart_conditions: self.has_heart_conditions,
            has_respiratory_conditions: self.has_respiratory_conditions,
            has_mobility_issues: self.has_mobility_issues,
            medical_conditions: normalize_conditions(&self.medical_conditions),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Integer(value) => value.to_string(),
        TextOrNumber::Float(value) => value.to_string(),
    })
}

pub fn normalize_conditions(labels: &[String]) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    for label in labels {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            continue;
        }
        if !KNOWN_CONDITIONS.contains(&label.as_str()) {
            tracing::debug!(condition = %label, "condition is not on the checklist");
        }
        set.insert(label);
    }
    set
}

fn parse_in_range<T>(
    field: &'static str,
    raw: &str,
    range: RangeInclusive<T>,
) -> Result<T, ValidationError>
where
    T: std::str::FromStr + PartialOrd + ToString,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }

    let value = trimmed
        .parse::<T>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        })?;

    // NaN fails `contains`, so it is reported as out of range.
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value: trimmed.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
        });
    }

    Ok(value)
}
