use crate::tours::Tour;
use crate::tours::booking::{Quote, format_vnd};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TourSummary {
    pub id: String,
    pub title: String,
    pub location: String,
    pub difficulty: String,
    pub tour_type: String,
    pub duration_days: u32,
    pub price: u64,
}

impl From<&Tour> for TourSummary {
    fn from(tour: &Tour) -> Self {
        Self {
            id: tour.id.clone(),
            title: tour.title.clone(),
            location: tour.location.clone(),
            difficulty: tour.difficulty.to_string(),
            tour_type: tour.tour_type.to_string(),
            duration_days: tour.duration_days,
            price: tour.price,
        }
    }
}

pub fn print_tours(heading: &str, tours: &[&Tour]) {
    println!("{} ({} found)", heading.bold(), tours.len());
    if tours.is_empty() {
        println!("no tours match; try another keyword or loosen the filters");
        return;
    }

    for tour in tours {
        println!();
        println!(
            "[{}] {}{}",
            tour.difficulty.colored(),
            tour.title,
            if tour.featured { " *" } else { "" }
        );
        println!(
            "   {} | {} | {} day(s) | {} VND",
            tour.location,
            tour.tour_type,
            tour.duration_days,
            format_vnd(tour.price)
        );
        println!("   id: {}", tour.id);
    }
}

pub fn print_quote(quote: &Quote) {
    println!("{}", quote.tour_title.bold());
    if let (true, Some(requested)) = (quote.adjusted, quote.requested) {
        println!(
            "participants: {} (adjusted from {})",
            quote.participants, requested
        );
    } else {
        println!("participants: {}", quote.participants);
    }
    println!(
        "{} x {} VND = {} VND",
        quote.participants,
        format_vnd(quote.unit_price),
        format_vnd(quote.total_price).green().bold()
    );
    if !quote.bookable {
        println!("{}", "tour is not currently open for booking".red());
    }
}
