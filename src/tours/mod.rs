pub mod booking;
pub mod filter;
pub mod report;

use crate::core::difficulty::Difficulty;
use crate::utils::fs::{self as fs_utils, DocumentFormat};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TourType {
    Trekking,
    Experience,
    Traditional,
    International,
    TeamBuilding,
}

impl fmt::Display for TourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trekking => write!(f, "trekking"),
            Self::Experience => write!(f, "experience"),
            Self::Traditional => write!(f, "traditional"),
            Self::International => write!(f, "international"),
            Self::TeamBuilding => write!(f, "team_building"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tour {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub tour_type: TourType,
    pub duration_days: u32,
    /// VND per participant.
    pub price: u64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_tier: Option<String>,
    #[serde(default)]
    pub transportation: Vec<String>,
    #[serde(default = "default_min_participants")]
    pub min_participants: u32,
    pub max_participants: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

fn default_min_participants() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    tours: Vec<Tour>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tours: Vec<Tour>,
}

impl Catalog {
    pub fn find(&self, id_or_slug: &str) -> Option<&Tour> {
        self.tours
            .iter()
            .find(|tour| tour.id == id_or_slug || tour.slug == id_or_slug)
    }

    fn push_checked(&mut self, tour: Tour, seen: &mut HashSet<String>, source: &str) -> Result<()> {
        if !seen.insert(tour.id.clone()) {
            bail!("duplicate tour id `{}` in {}", tour.id, source);
        }
        if tour.min_participants == 0 || tour.min_participants > tour.max_participants {
            bail!(
                "tour `{}` in {} has invalid participant bounds {}..={}",
                tour.id,
                source,
                tour.min_participants,
                tour.max_participants
            );
        }
        self.tours.push(tour);
        Ok(())
    }
}

/// Loads a catalog from one file, or from every TOML/JSON file under a directory.
pub fn load_catalog(path: &Path, exclude: &[String]) -> Result<Catalog> {
    if !path.exists() {
        bail!("catalog not found at {}", path.display());
    }

    let mut catalog = Catalog::default();
    let mut seen = HashSet::new();

    if path.is_file() {
        let format = fs_utils::document_format(path).unwrap_or(DocumentFormat::Toml);
        for tour in read_document(path, format)? {
            catalog.push_checked(tour, &mut seen, &path.display().to_string())?;
        }
        return Ok(catalog);
    }

    // The excludes prune nested directories only, never the root that was asked for.
    let walker = WalkDir::new(path)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || fs_utils::should_visit(entry, exclude));

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "skipping unreadable catalog entry"),
        }
    }
    files.sort();

    for file in files {
        let rel = fs_utils::relative_path(path, &file);
        let Some(format) = fs_utils::document_format(&file) else {
            tracing::warn!(file = %rel, "skipping non-catalog file");
            continue;
        };
        for tour in read_document(&file, format)? {
            catalog.push_checked(tour, &mut seen, &rel)?;
        }
    }

    Ok(catalog)
}

fn read_document(path: &Path, format: DocumentFormat) -> Result<Vec<Tour>> {
    tracing::debug!(file = %path.display(), ?format, "reading catalog file");
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading catalog file {}", path.display()))?;

    let document: CatalogDocument = match format {
        DocumentFormat::Toml => toml::from_str(&content)
            .with_context(|| format!("failed parsing catalog file {}", path.display()))?,
        DocumentFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("failed parsing catalog file {}", path.display()))?,
    };
    Ok(document.tours)
}
