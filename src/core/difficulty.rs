use crate::config::ThresholdConfig;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tour difficulty tier. Ordering follows physical demand.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Challenging,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Self::Easy,
        Self::Moderate,
        Self::Challenging,
        Self::Extreme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Challenging => "challenging",
            Self::Extreme => "extreme",
        }
    }

    pub fn colored(self) -> String {
        match self {
            Self::Easy => self.as_str().green().bold().to_string(),
            Self::Moderate => self.as_str().blue().bold().to_string(),
            Self::Challenging => self.as_str().yellow().bold().to_string(),
            Self::Extreme => self.as_str().red().bold().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty `{0}` (expected easy, moderate, challenging or extreme)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

/// Maps a score onto a tier, checking the highest threshold first.
pub fn recommended_for_score(score: u8, thresholds: &ThresholdConfig) -> Difficulty {
    if score >= thresholds.extreme {
        Difficulty::Extreme
    } else if score >= thresholds.challenging {
        Difficulty::Challenging
    } else if score >= thresholds.moderate {
        Difficulty::Moderate
    } else {
        Difficulty::Easy
    }
}
