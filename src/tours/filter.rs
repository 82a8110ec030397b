use crate::core::difficulty::Difficulty;
use crate::core::score::HealthAssessmentResult;
use crate::tours::{Catalog, Tour, TourType};
use crate::utils::text::slug_contains;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MILLION_VND: u64 = 1_000_000;

static PRICE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?:-\s*(\d+)|\+)\s*$").expect("valid price range regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceRangeError {
    #[error("price range `{0}` must look like `5-10` or `20+` (millions of VND)")]
    Malformed(String),
    #[error("price range `{0}` has its lower bound above its upper bound")]
    Inverted(String),
}

/// Inclusive bounds in VND. `max = None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl PriceRange {
    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = PRICE_RANGE_RE
            .captures(s)
            .ok_or_else(|| PriceRangeError::Malformed(s.to_string()))?;
        let millions = |m: regex::Match<'_>| {
            m.as_str()
                .parse::<u64>()
                .ok()
                .and_then(|v| v.checked_mul(MILLION_VND))
                .ok_or_else(|| PriceRangeError::Malformed(s.to_string()))
        };

        let min = millions(caps.get(1).ok_or_else(|| PriceRangeError::Malformed(s.to_string()))?)?;
        let max = caps.get(2).map(millions).transpose()?;
        if max.is_some_and(|max| max < min) {
            return Err(PriceRangeError::Inverted(s.to_string()));
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min / MILLION_VND, max / MILLION_VND),
            None => write!(f, "{}+", self.min / MILLION_VND),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TourFilter {
    pub search: Option<String>,
    pub destination: Option<String>,
    pub price_range: Option<PriceRange>,
    pub quality_tier: Option<String>,
    pub tour_type: Option<TourType>,
    pub transportation: Option<String>,
    pub max_difficulty: Option<Difficulty>,
    pub featured_only: bool,
}

impl TourFilter {
    pub fn matches(&self, tour: &Tour) -> bool {
        if !tour.active {
            return false;
        }

        // Blank searches are ignored, like an empty search box.
        if let Some(search) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = search.to_lowercase();
            if !tour.location.to_lowercase().contains(&needle)
                && !slug_contains(&tour.location, search)
            {
                return false;
            }
        }

        let destination = self
            .destination
            .as_deref()
            .filter(|d| !d.eq_ignore_ascii_case("all"));
        if destination.is_some_and(|d| !slug_contains(&tour.location, d)) {
            return false;
        }

        if self
            .price_range
            .is_some_and(|range| !range.contains(tour.price))
        {
            return false;
        }

        if self
            .quality_tier
            .as_deref()
            .is_some_and(|tier| tour.quality_tier.as_deref() != Some(tier))
        {
            return false;
        }

        if self.tour_type.is_some_and(|kind| kind != tour.tour_type) {
            return false;
        }

        if let Some(mode) = &self.transportation {
            if !tour
                .transportation
                .iter()
                .any(|t| t.eq_ignore_ascii_case(mode))
            {
                return false;
            }
        }

        if self
            .max_difficulty
            .is_some_and(|ceiling| tour.difficulty > ceiling)
        {
            return false;
        }

        !self.featured_only || tour.featured
    }

    /// Matching tours, newest first.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Tour> {
        let mut matched: Vec<&Tour> = catalog.tours.iter().filter(|t| self.matches(t)).collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        matched
    }
}

/// Tours at or below the assessed tier; harder tours first among equally new ones.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    result: &HealthAssessmentResult,
    filter: &TourFilter,
) -> Vec<&'a Tour> {
    let filter = TourFilter {
        max_difficulty: Some(result.recommended_difficulty),
        ..filter.clone()
    };

    let mut matched: Vec<&Tour> = catalog.tours.iter().filter(|t| filter.matches(t)).collect();
    matched.sort_by_key(|t| (Reverse(t.created_at), Reverse(t.difficulty), t.id.clone()));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tours::tests::tour;

    fn catalog() -> Catalog {
        let mut ha_giang = tour("ha-giang-loop", Difficulty::Challenging, 5_000_000, "Hà Giang");
        ha_giang.created_at = "2025-04-01T00:00:00Z".parse().unwrap();
        ha_giang.transportation = vec!["Motorbike".to_string()];
        ha_giang.quality_tier = Some("premium".to_string());

        let mut sapa = tour("sapa-trek", Difficulty::Moderate, 3_200_000, "Sa Pa, Lào Cai");
        sapa.created_at = "2025-03-01T00:00:00Z".parse().unwrap();
        sapa.featured = true;

        let mut ta_xua = tour("ta-xua", Difficulty::Extreme, 20_000_000, "Tà Xùa, Sơn La");
        ta_xua.created_at = "2025-03-01T00:00:00Z".parse().unwrap();

        let mut retired = tour("old-halong", Difficulty::Easy, 1_000_000, "Hạ Long");
        retired.active = false;

        let mut halong = tour("halong-cruise", Difficulty::Easy, 9_000_000, "Hạ Long");
        halong.tour_type = TourType::Experience;

        Catalog {
            tours: vec![halong, retired, sapa, ta_xua, ha_giang],
        }
    }

    fn ids(tours: &[&Tour]) -> Vec<String> {
        tours.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn parses_website_price_buttons() {
        let under_five: PriceRange = "0-5".parse().unwrap();
        assert!(under_five.contains(5_000_000));
        assert!(!under_five.contains(5_000_001));

        let over_twenty: PriceRange = "20+".parse().unwrap();
        assert_eq!(over_twenty.max, None);
        assert!(over_twenty.contains(20_000_000));
        assert!(!over_twenty.contains(19_999_999));
        assert_eq!(over_twenty.to_string(), "20+");

        assert!(matches!(
            "10-5".parse::<PriceRange>(),
            Err(PriceRangeError::Inverted(_))
        ));
        assert!(matches!(
            "cheap".parse::<PriceRange>(),
            Err(PriceRangeError::Malformed(_))
        ));
    }

    #[test]
    fn unfiltered_listing_hides_inactive_and_orders_newest_first() {
        let catalog = catalog();
        let listed = TourFilter::default().apply(&catalog);
        assert_eq!(
            ids(&listed),
            vec!["ha-giang-loop", "sapa-trek", "ta-xua", "halong-cruise"]
        );
    }

    #[test]
    fn destination_matches_folded_slug() {
        let catalog = catalog();
        let filter = TourFilter {
            destination: Some("ha-giang".to_string()),
            ..TourFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog)), vec!["ha-giang-loop"]);

        let all = TourFilter {
            destination: Some("all".to_string()),
            ..TourFilter::default()
        };
        assert_eq!(all.apply(&catalog).len(), 4);
    }

    #[test]
    fn search_accepts_accented_or_plain_text() {
        let catalog = catalog();
        for query in ["lào cai", "Lao Cai"] {
            let filter = TourFilter {
                search: Some(query.to_string()),
                ..TourFilter::default()
            };
            assert_eq!(ids(&filter.apply(&catalog)), vec!["sapa-trek"]);
        }
    }

    #[test]
    fn combines_price_type_tier_and_transport() {
        let catalog = catalog();
        let filter = TourFilter {
            price_range: Some("5-10".parse().unwrap()),
            ..TourFilter::default()
        };
        assert_eq!(
            ids(&filter.apply(&catalog)),
            vec!["ha-giang-loop", "halong-cruise"]
        );

        let filter = TourFilter {
            price_range: Some("5-10".parse().unwrap()),
            tour_type: Some(TourType::Trekking),
            quality_tier: Some("premium".to_string()),
            transportation: Some("motorbike".to_string()),
            ..TourFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog)), vec!["ha-giang-loop"]);

        let featured = TourFilter {
            featured_only: true,
            ..TourFilter::default()
        };
        assert_eq!(ids(&featured.apply(&catalog)), vec!["sapa-trek"]);
    }

    #[test]
    fn recommendation_caps_difficulty_and_prefers_harder_tours() {
        let catalog = catalog();
        let result = HealthAssessmentResult {
            score: 65,
            recommended_difficulty: Difficulty::Challenging,
            warnings: Vec::new(),
        };
        let picks = recommend(&catalog, &result, &TourFilter::default());
        assert_eq!(
            ids(&picks),
            vec!["ha-giang-loop", "sapa-trek", "halong-cruise"]
        );

        let easy = HealthAssessmentResult {
            recommended_difficulty: Difficulty::Easy,
            ..result
        };
        assert_eq!(
            ids(&recommend(&catalog, &easy, &TourFilter::default())),
            vec!["halong-cruise"]
        );
    }

    #[test]
    fn punctuation_only_search_or_destination_matches_nothing() {
        let catalog = catalog();
        for query in ["-", "...", " # "] {
            let search = TourFilter {
                search: Some(query.to_string()),
                ..TourFilter::default()
            };
            assert!(search.apply(&catalog).is_empty(), "search {query:?}");
        }

        for query in [",", " ", "-"] {
            let destination = TourFilter {
                destination: Some(query.to_string()),
                ..TourFilter::default()
            };
            assert!(
                destination.apply(&catalog).is_empty(),
                "destination {query:?}"
            );
        }

        let blank = TourFilter {
            search: Some("   ".to_string()),
            ..TourFilter::default()
        };
        assert_eq!(blank.apply(&catalog).len(), 4);
    }

    #[test]
    fn search_matches_decomposed_locations() {
        let mut catalog = catalog();
        catalog.tours[2].location = "Sa Pa, La\u{300}o Cai".to_string();
        let filter = TourFilter {
            search: Some("Lao Cai".to_string()),
            ..TourFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog)), vec!["sapa-trek"]);
    }
}
