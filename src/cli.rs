use crate::core::difficulty::Difficulty;
use crate::core::validate::RawAnswers;
use crate::tours::TourType;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "trailready",
    version,
    about = "Trek readiness scoring, tour filters, and booking quotes"
)]
pub struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a health self-assessment and recommend a difficulty tier
    Assess(AssessArgs),
    /// Write a default trailready.toml in the current directory
    Init,
    /// Browse the tour catalog or match tours to an assessment
    Tours {
        #[command(subcommand)]
        command: ToursSubcommand,
    },
    /// Quote a booking for a catalog tour
    Book {
        #[command(subcommand)]
        command: BookSubcommand,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct AnswerArgs {
    /// Read answers from a JSON or TOML file instead of flags
    #[arg(long, conflicts_with_all = ["age", "height", "weight"])]
    pub answers: Option<PathBuf>,
    #[arg(long)]
    pub age: Option<String>,
    /// Height in centimetres
    #[arg(long)]
    pub height: Option<String>,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long, default_value = "5")]
    pub fitness: String,
    #[arg(long, default_value = "5")]
    pub experience: String,
    #[arg(long)]
    pub heart: bool,
    #[arg(long)]
    pub respiratory: bool,
    #[arg(long)]
    pub mobility: bool,
    /// Other medical condition (repeatable), e.g. diabetes, hypertension
    #[arg(long = "condition")]
    pub conditions: Vec<String>,
}

impl AnswerArgs {
    pub fn to_raw(&self) -> RawAnswers {
        RawAnswers {
            age: self.age.clone().unwrap_or_default(),
            height_cm: self.height.clone().unwrap_or_default(),
            weight_kg: self.weight.clone().unwrap_or_default(),
            fitness_level: self.fitness.clone(),
            experience_level: self.experience.clone(),
            has_heart_conditions: self.heart,
            has_respiratory_conditions: self.respiratory,
            has_mobility_issues: self.mobility,
            medical_conditions: self.conditions.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub answers: AnswerArgs,
    /// Exit with status 1 when any warning is raised
    #[arg(long)]
    pub strict: bool,
    /// Emit the storage record for this user instead of the report (implies --json)
    #[arg(long)]
    pub user_id: Option<String>,
    #[arg(long, requires = "user_id")]
    pub emergency_name: Option<String>,
    #[arg(long, requires = "user_id")]
    pub emergency_phone: Option<String>,
}

#[derive(Debug, Args, Clone, Default)]
pub struct FilterArgs {
    /// Catalog file or directory (defaults to [catalog].path)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    #[arg(long)]
    pub search: Option<String>,
    /// Destination slug, e.g. ha-giang; `all` disables the filter
    #[arg(long)]
    pub destination: Option<String>,
    /// Budget in millions of VND: 0-5, 5-10, 10-20, 20+
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub tier: Option<String>,
    #[arg(long = "type", value_enum)]
    pub tour_type: Option<TourTypeArg>,
    #[arg(long)]
    pub transport: Option<String>,
    #[arg(long)]
    pub featured: bool,
}

#[derive(Debug, Subcommand)]
pub enum ToursSubcommand {
    /// List active tours matching the filters
    List(ListArgs),
    /// Assess, then list tours at or below the recommended difficulty
    Recommend(RecommendArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub filter: FilterArgs,
    #[arg(long, value_enum)]
    pub max_difficulty: Option<DifficultyArg>,
}

#[derive(Debug, Args, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub filter: FilterArgs,
    #[command(flatten)]
    pub answers: AnswerArgs,
}

#[derive(Debug, Subcommand)]
pub enum BookSubcommand {
    /// Price a booking for a tour id or slug
    Quote(QuoteArgs),
}

#[derive(Debug, Args, Clone)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    pub tour: String,
    #[arg(long)]
    pub participants: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Moderate,
    Challenging,
    Extreme,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Moderate => Self::Moderate,
            DifficultyArg::Challenging => Self::Challenging,
            DifficultyArg::Extreme => Self::Extreme,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TourTypeArg {
    Trekking,
    Experience,
    Traditional,
    International,
    TeamBuilding,
}

impl From<TourTypeArg> for TourType {
    fn from(arg: TourTypeArg) -> Self {
        match arg {
            TourTypeArg::Trekking => Self::Trekking,
            TourTypeArg::Experience => Self::Experience,
            TourTypeArg::Traditional => Self::Traditional,
            TourTypeArg::International => Self::International,
            TourTypeArg::TeamBuilding => Self::TeamBuilding,
        }
    }
}
