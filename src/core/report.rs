use crate::core::score::{HealthAssessmentInput, HealthAssessmentResult, ScoreBreakdown};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct AssessmentReport {
    pub input: HealthAssessmentInput,
    pub breakdown: ScoreBreakdown,
    pub result: HealthAssessmentResult,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub score: u8,
    pub recommended_difficulty: String,
    pub warnings: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub bmi: f64,
}

impl From<&AssessmentReport> for JsonReport {
    fn from(report: &AssessmentReport) -> Self {
        Self {
            score: report.result.score,
            recommended_difficulty: report.result.recommended_difficulty.to_string(),
            warnings: report.result.warnings.clone(),
            breakdown: report.breakdown,
            bmi: round_tenth(report.input.bmi()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Row shape of the `health_assessments` table the web app writes to.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    pub age: u32,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub fitness_level: u8,
    pub experience_level: u8,
    pub has_heart_conditions: bool,
    pub has_respiratory_conditions: bool,
    pub has_mobility_issues: bool,
    pub medical_conditions: Vec<String>,
    #[serde(flatten)]
    pub result: HealthAssessmentResult,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn new(
        user_id: impl Into<String>,
        contact: EmergencyContact,
        input: &HealthAssessmentInput,
        result: &HealthAssessmentResult,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            emergency_contact_name: contact.name,
            emergency_contact_phone: contact.phone,
            age: input.age,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            fitness_level: input.fitness_level,
            experience_level: input.experience_level,
            has_heart_conditions: input.has_heart_conditions,
            has_respiratory_conditions: input.has_respiratory_conditions,
            has_mobility_issues: input.has_mobility_issues,
            medical_conditions: input.medical_conditions.iter().cloned().collect(),
            result: result.clone(),
            assessed_at: Utc::now(),
        }
    }
}

pub fn evaluate_exit(result: &HealthAssessmentResult, strict: bool) -> ExitStatus {
    let mut reasons = Vec::new();
    if strict && !result.warnings.is_empty() {
        reasons.push(format!(
            "{} health warning(s) raised in strict mode",
            result.warnings.len()
        ));
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

pub fn print_human(report: &AssessmentReport) {
    let result = &report.result;
    println!(
        "Trek Readiness Score: {}/100 (recommended: {})",
        result.score,
        result.recommended_difficulty.colored()
    );

    let parts = &report.breakdown;
    println!();
    println!("{}", "BREAKDOWN".bold());
    println!("  age         {:+}", parts.age);
    println!(
        "  bmi         {:+}  (bmi {:.1})",
        parts.bmi,
        report.input.bmi()
    );
    println!("  fitness     {:+}", parts.fitness);
    println!("  experience  {:+}", parts.experience);
    println!("  conditions  {:+}", -parts.penalties);
    if parts.raw_total() != i32::from(result.score) {
        println!("  (raw total {} clamped to {})", parts.raw_total(), result.score);
    }

    if !result.warnings.is_empty() {
        println!();
        println!(
            "{} ({})",
            "WARNINGS".yellow().bold(),
            result.warnings.len()
        );
        for warning in &result.warnings {
            println!("-> {}", warning);
        }
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
