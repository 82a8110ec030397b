pub mod difficulty;
pub mod report;
pub mod score;
pub mod validate;

use crate::config::Config;
use crate::core::report::AssessmentReport;
use crate::core::validate::RawAnswers;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn run_assessment(raw: &RawAnswers, cfg: &Config) -> Result<AssessmentReport> {
    let input = raw
        .validate()
        .inspect_err(|err| tracing::debug!(field = err.field(), "rejected answers"))
        .context("invalid questionnaire answers")?;
    let (breakdown, result) = score::assess(&input, cfg);
    let exit = report::evaluate_exit(&result, cfg.general.strict);

    Ok(AssessmentReport {
        input,
        breakdown,
        result,
        exit,
    })
}

/// Reads answers from a JSON or TOML file, picked by extension.
pub fn read_answers(path: &Path) -> Result<RawAnswers> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading answers file {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("failed parsing answers file {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed parsing answers file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::difficulty::Difficulty;
    use tempfile::tempdir;

    #[test]
    fn runs_assessment_from_json_answers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("answers.json");
        fs::write(
            &path,
            r#"{"age":"25","height_cm":"170","weight_kg":"65","fitness_level":"8","experience_level":"8"}"#,
        )
        .unwrap();

        let raw = read_answers(&path).unwrap();
        let report = run_assessment(&raw, &Config::default()).unwrap();
        assert_eq!(report.result.score, 80);
        assert_eq!(report.result.recommended_difficulty, Difficulty::Extreme);
        assert!(report.exit.ok);
    }

    #[test]
    fn reads_bare_numbers_from_toml_answers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("answers.toml");
        fs::write(
            &path,
            "age = 25\nheight_cm = 170\nweight_kg = 65\nfitness_level = 8\nexperience_level = 8\n",
        )
        .unwrap();

        let report = run_assessment(&read_answers(&path).unwrap(), &Config::default()).unwrap();
        assert_eq!(report.result.score, 80);
        assert_eq!(report.breakdown.score(), report.result.score);
    }

    #[test]
    fn invalid_answers_surface_the_field() {
        let raw = RawAnswers {
            age: "abc".to_string(),
            ..RawAnswers::default()
        };
        let err = run_assessment(&raw, &Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("age must be a number"));
    }
}
