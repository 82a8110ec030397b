use crate::tours::Tour;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("total price overflows for {participants} participants at {price} VND")]
    Overflow { participants: u32, price: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub tour_id: String,
    pub tour_title: String,
    pub requested: Option<u32>,
    pub participants: u32,
    pub adjusted: bool,
    pub unit_price: u64,
    pub total_price: u64,
    pub bookable: bool,
}

pub fn quote(tour: &Tour, requested: Option<u32>) -> Result<Quote, QuoteError> {
    let participants = match requested {
        None | Some(0) => tour.min_participants,
        Some(n) => n.clamp(tour.min_participants, tour.max_participants),
    };
    let total_price = tour
        .price
        .checked_mul(u64::from(participants))
        .ok_or(QuoteError::Overflow {
            participants,
            price: tour.price,
        })?;

    if !tour.active {
        tracing::warn!(tour = %tour.id, "quoting an inactive tour");
    }

    Ok(Quote {
        tour_id: tour.id.clone(),
        tour_title: tour.title.clone(),
        requested,
        participants,
        adjusted: requested != Some(participants),
        unit_price: tour.price,
        total_price,
        bookable: tour.active,
    })
}

/// Groups digits the way prices are shown on the website, e.g. `6.500.000`.
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
