use crate::config::{Config, ScoringConfig, WarningConfig};
use crate::core::difficulty::{Difficulty, recommended_for_score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Checklist offered by the questionnaire. Other labels are still penalised.
pub const KNOWN_CONDITIONS: [&str; 4] = ["diabetes", "hypertension", "anemia", "severe-allergy"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessmentInput {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fitness_level: u8,
    pub experience_level: u8,
    pub has_heart_conditions: bool,
    pub has_respiratory_conditions: bool,
    pub has_mobility_issues: bool,
    pub medical_conditions: BTreeSet<String>,
}

impl HealthAssessmentInput {
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAssessmentResult {
    pub score: u8,
    pub recommended_difficulty: Difficulty,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub age: i32,
    pub bmi: i32,
    pub fitness: i32,
    pub experience: i32,
    pub penalties: i32,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> i32 {
        self.age
            .saturating_add(self.bmi)
            .saturating_add(self.fitness)
            .saturating_add(self.experience)
            .saturating_sub(self.penalties)
    }

    pub fn score(&self) -> u8 {
        self.raw_total().clamp(0, 100) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    SeniorAge,
    HeartCondition,
    RespiratoryCondition,
    MobilityIssue,
    LowFitness,
    LowExperience,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Self::SeniorAge => {
                "given your age, consult a doctor before joining extreme or adventurous tours"
            }
            Self::HeartCondition => {
                "heart conditions can be dangerous during strenuous physical activity; consult a doctor"
            }
            Self::RespiratoryCondition => {
                "respiratory conditions can cause difficulty at altitude; medical supervision is required"
            }
            Self::MobilityIssue => {
                "mobility issues may limit your ability to take part in difficult tours"
            }
            Self::LowFitness => "low fitness level; start with easy tours and build up gradually",
            Self::LowExperience => "limited trekking experience; only join tours with an experienced guide",
        }
    }
}

pub fn age_points(age: u32, cfg: &ScoringConfig) -> i32 {
    cfg.age_bands
        .iter()
        .find(|band| age < band.below)
        .map_or(cfg.age_fallback_points, |band| band.points)
}

/// A NaN BMI matches no band and falls through to the fallback.
pub fn bmi_points(bmi: f64, cfg: &ScoringConfig) -> i32 {
    cfg.bmi_bands
        .iter()
        .find(|band| band.contains(bmi))
        .map_or(cfg.bmi_fallback_points, |band| band.points)
}

pub fn breakdown(input: &HealthAssessmentInput, cfg: &ScoringConfig) -> ScoreBreakdown {
    let flags = [
        (input.has_heart_conditions, cfg.heart_penalty),
        (input.has_respiratory_conditions, cfg.respiratory_penalty),
        (input.has_mobility_issues, cfg.mobility_penalty),
    ];
    let conditions = i32::try_from(input.medical_conditions.len()).unwrap_or(i32::MAX);
    let penalties = flags
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(conditions.saturating_mul(cfg.condition_penalty), |total, (_, penalty)| {
            total.saturating_add(penalty)
        });

    ScoreBreakdown {
        age: age_points(input.age, cfg),
        bmi: bmi_points(input.bmi(), cfg),
        fitness: i32::from(input.fitness_level).saturating_mul(cfg.fitness_multiplier),
        experience: i32::from(input.experience_level).saturating_mul(cfg.experience_multiplier),
        penalties,
    }
}

pub fn advisories(input: &HealthAssessmentInput, cfg: &WarningConfig) -> Vec<Advisory> {
    let rules = [
        (input.age > cfg.senior_age, Advisory::SeniorAge),
        (input.has_heart_conditions, Advisory::HeartCondition),
        (input.has_respiratory_conditions, Advisory::RespiratoryCondition),
        (input.has_mobility_issues, Advisory::MobilityIssue),
        (input.fitness_level < cfg.low_fitness, Advisory::LowFitness),
        (input.experience_level < cfg.low_experience, Advisory::LowExperience),
    ];

    rules
        .into_iter()
        .filter_map(|(triggered, advisory)| triggered.then_some(advisory))
        .collect()
}

/// Scores the answers once and returns the breakdown with the labelled result.
pub fn assess(
    input: &HealthAssessmentInput,
    cfg: &Config,
) -> (ScoreBreakdown, HealthAssessmentResult) {
    let parts = breakdown(input, &cfg.scoring);
    let result = label_breakdown(input, &parts, cfg);
    (parts, result)
}

fn label_breakdown(
    input: &HealthAssessmentInput,
    parts: &ScoreBreakdown,
    cfg: &Config,
) -> HealthAssessmentResult {
    let score = parts.score();
    tracing::debug!(
        age = parts.age,
        bmi = parts.bmi,
        fitness = parts.fitness,
        experience = parts.experience,
        penalties = parts.penalties,
        raw_total = parts.raw_total(),
        score,
        "computed health score"
    );

    HealthAssessmentResult {
        score,
        recommended_difficulty: recommended_for_score(score, &cfg.thresholds),
        warnings: advisories(input, &cfg.warnings)
            .into_iter()
            .map(|advisory| advisory.message().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(age: u32, height_cm: f64, weight_kg: f64, fitness: u8, experience: u8) -> HealthAssessmentInput {
        HealthAssessmentInput {
            age,
            height_cm,
            weight_kg,
            fitness_level: fitness,
            experience_level: experience,
            has_heart_conditions: false,
            has_respiratory_conditions: false,
            has_mobility_issues: false,
            medical_conditions: BTreeSet::new(),
        }
    }

    #[test]
    fn fit_young_trekker_reaches_extreme() {
        let (_, result) = assess(&input(25, 170.0, 65.0, 8, 8), &Config::default());
        assert_eq!(result.score, 80);
        assert_eq!(result.recommended_difficulty, Difficulty::Extreme);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn senior_with_heart_condition_clamps_to_zero() {
        let mut answers = input(65, 160.0, 90.0, 2, 2);
        answers.has_heart_conditions = true;

        let parts = breakdown(&answers, &ScoringConfig::default());
        assert_eq!(parts.bmi, 5);
        assert_eq!(parts.raw_total(), 0);

        let (_, result) = assess(&answers, &Config::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.recommended_difficulty, Difficulty::Easy);
        assert_eq!(
            advisories(&answers, &WarningConfig::default()),
            vec![
                Advisory::SeniorAge,
                Advisory::HeartCondition,
                Advisory::LowFitness,
                Advisory::LowExperience,
            ]
        );
        assert_eq!(result.warnings.len(), 4);
        assert_eq!(result.warnings[1], Advisory::HeartCondition.message());
    }

    #[test]
    fn age_bands_follow_upper_edges() {
        let cfg = ScoringConfig::default();
        assert_eq!(age_points(29, &cfg), 20);
        assert_eq!(age_points(30, &cfg), 15);
        assert_eq!(age_points(49, &cfg), 10);
        assert_eq!(age_points(59, &cfg), 5);
        assert_eq!(age_points(60, &cfg), 0);
    }

    #[test]
    fn bmi_bands_cover_edge_ranges() {
        let cfg = ScoringConfig::default();
        assert_eq!(bmi_points(18.5, &cfg), 20);
        assert_eq!(bmi_points(25.0, &cfg), 15);
        assert_eq!(bmi_points(30.0, &cfg), 10);
        assert_eq!(bmi_points(17.2, &cfg), 10);
        assert_eq!(bmi_points(35.0, &cfg), 5);
        assert_eq!(bmi_points(16.0, &cfg), 5);
        assert_eq!(bmi_points(f64::NAN, &cfg), 5);
    }

    #[test]
    fn every_listed_condition_costs_points() {
        let mut answers = input(35, 175.0, 70.0, 6, 6);
        let baseline = breakdown(&answers, &ScoringConfig::default()).score();
        answers.medical_conditions.insert("diabetes".to_string());
        answers.medical_conditions.insert("anemia".to_string());
        let penalised = breakdown(&answers, &ScoringConfig::default()).score();
        assert_eq!(baseline - penalised, 10);
    }

    #[test]
    fn senior_warning_starts_above_cutoff() {
        let cfg = WarningConfig::default();
        assert!(advisories(&input(60, 170.0, 65.0, 5, 5), &cfg).is_empty());
        assert_eq!(
            advisories(&input(61, 170.0, 65.0, 5, 5), &cfg),
            vec![Advisory::SeniorAge]
        );
    }

    #[test]
    fn custom_weights_are_honoured() {
        let mut cfg = Config::default();
        cfg.scoring.fitness_multiplier = 0;
        cfg.scoring.experience_multiplier = 0;
        let (_, result) = assess(&input(25, 170.0, 65.0, 10, 10), &cfg);
        assert_eq!(result.score, 40);
        assert_eq!(result.recommended_difficulty, Difficulty::Moderate);
    }

    #[test]
    fn oversized_penalties_saturate_instead_of_overflowing() {
        let mut cfg = ScoringConfig::default();
        cfg.condition_penalty = i32::MAX;
        cfg.heart_penalty = i32::MAX;
        let mut answers = input(25, 170.0, 65.0, 8, 8);
        answers.has_heart_conditions = true;
        answers.medical_conditions.insert("diabetes".to_string());
        answers.medical_conditions.insert("asthma".to_string());

        let parts = breakdown(&answers, &cfg);
        assert_eq!(parts.penalties, i32::MAX);
        assert_eq!(parts.score(), 0);

        cfg.fitness_multiplier = i32::MAX;
        cfg.condition_penalty = 0;
        cfg.heart_penalty = 0;
        assert_eq!(breakdown(&answers, &cfg).score(), 100);
    }

    #[test]
    fn result_matches_the_breakdown_it_was_built_from() {
        let cfg = Config::default();
        let answers = input(45, 180.0, 85.0, 4, 2);
        let (parts, result) = assess(&answers, &cfg);
        assert_eq!(parts, breakdown(&answers, &cfg.scoring));
        assert_eq!(result.score, parts.score());
    }

    fn arb_input() -> impl Strategy<Value = HealthAssessmentInput> {
        (
            1u32..=120,
            50.0f64..=250.0,
            20.0f64..=300.0,
            1u8..=10,
            1u8..=10,
            any::<[bool; 3]>(),
            proptest::collection::btree_set("[a-z]{3,10}", 0..4),
        )
            .prop_map(|(age, h, w, fit, exp, flags, conditions)| HealthAssessmentInput {
                age,
                height_cm: h,
                weight_kg: w,
                fitness_level: fit,
                experience_level: exp,
                has_heart_conditions: flags[0],
                has_respiratory_conditions: flags[1],
                has_mobility_issues: flags[2],
                medical_conditions: conditions,
            })
    }

    proptest! {
        #[test]
        fn score_stays_in_range(answers in arb_input()) {
            let (_, result) = assess(&answers, &Config::default());
            prop_assert!(result.score <= 100);
        }

        #[test]
        fn score_never_drops_with_more_fitness_or_experience(answers in arb_input()) {
            let cfg = ScoringConfig::default();
            let base = breakdown(&answers, &cfg).score();

            let mut fitter = answers.clone();
            fitter.fitness_level = (fitter.fitness_level + 1).min(10);
            prop_assert!(breakdown(&fitter, &cfg).score() >= base);

            let mut seasoned = answers.clone();
            seasoned.experience_level = (seasoned.experience_level + 1).min(10);
            prop_assert!(breakdown(&seasoned, &cfg).score() >= base);
        }

        #[test]
        fn conditions_strictly_lower_unclamped_scores(answers in arb_input()) {
            let cfg = ScoringConfig::default();
            let mut clear = answers.clone();
            clear.has_heart_conditions = false;
            clear.has_respiratory_conditions = false;
            clear.has_mobility_issues = false;
            let clear_parts = breakdown(&clear, &cfg);

            for flag in 0..3 {
                let mut flagged = clear.clone();
                match flag {
                    0 => flagged.has_heart_conditions = true,
                    1 => flagged.has_respiratory_conditions = true,
                    _ => flagged.has_mobility_issues = true,
                }
                let flagged_parts = breakdown(&flagged, &cfg);
                prop_assert!(flagged_parts.raw_total() < clear_parts.raw_total());
                if clear_parts.raw_total() <= 100 && flagged_parts.raw_total() >= 0 {
                    prop_assert!(flagged_parts.score() < clear_parts.score());
                }
            }
        }

        #[test]
        fn assessing_twice_is_identical(answers in arb_input()) {
            let cfg = Config::default();
            prop_assert_eq!(assess(&answers, &cfg), assess(&answers, &cfg));
        }
    }
}
