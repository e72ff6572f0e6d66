//! Mock price lookup.
//!
//! Stands in for the FIPE price table: sleeps a configurable latency, then
//! fabricates a quote with a randomized price and FIPE code and the current
//! pt-BR reference month. Only the year is checked here — everything else
//! is the search form's job.

use std::time::Duration;

use chrono::{Datelike, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Vehicle categories the lookup serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Cars,
    Motorcycles,
    Trucks,
}

impl VehicleKind {
    /// Parse the wire form used by the search field (`cars`, `motorcycles`,
    /// `trucks`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cars" => Some(VehicleKind::Cars),
            "motorcycles" => Some(VehicleKind::Motorcycles),
            "trucks" => Some(VehicleKind::Trucks),
            _ => None,
        }
    }
}

/// What a search form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuery {
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub fuel: Option<String>,
}

/// A priced result for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuote {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub fuel: String,
    /// Whole BRL.
    pub price: u32,
    pub fipe_code: String,
    /// pt-BR month-and-year the price refers to, e.g. `agosto de 2026`.
    pub reference_month: String,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please enter a valid year")]
    InvalidYear,
}

const PT_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// The lookup service. One instance serves any number of queries.
#[derive(Debug, Clone)]
pub struct PriceLookup {
    latency: Duration,
}

impl Default for PriceLookup {
    fn default() -> Self {
        PriceLookup { latency: DEFAULT_LATENCY }
    }
}

impl PriceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero latency for tests; any duration for demo realism.
    pub fn with_latency(latency: Duration) -> Self {
        PriceLookup { latency }
    }

    /// Quote one vehicle. Rejects a year that is not a number between 1900
    /// and next year.
    pub async fn search(&self, query: &VehicleQuery) -> Result<VehicleQuote, LookupError> {
        let year: i32 = query.year.trim().parse().map_err(|_| LookupError::InvalidYear)?;
        let current = Local::now().year();
        if !(1900..=current + 1).contains(&year) {
            return Err(LookupError::InvalidYear);
        }

        if self.latency > Duration::ZERO {
            tokio::time::sleep(self.latency).await;
        }

        let (price, fipe_code) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(20_000..120_000), rng.gen_range(100_000..1_000_000))
        };
        debug!(brand = %query.brand, model = %query.model, year, "price lookup");

        Ok(VehicleQuote {
            id: format!("{}-{}-{}", query.brand, query.model, query.year),
            brand: query.brand.clone(),
            model: query.model.clone(),
            year: query.year.clone(),
            fuel: query.fuel.clone().unwrap_or_else(|| "Gasoline".to_string()),
            price,
            fipe_code: fipe_code.to_string(),
            reference_month: reference_month(),
        })
    }
}

/// The current month rendered the way the price table labels references.
fn reference_month() -> String {
    let today = Local::now().date_naive();
    format!("{} de {}", PT_MONTHS[today.month0() as usize], today.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(year: &str) -> VehicleQuery {
        VehicleQuery {
            vehicle_type: "cars".to_string(),
            brand: "Fiat".to_string(),
            model: "Uno".to_string(),
            year: year.to_string(),
            fuel: None,
        }
    }

    #[tokio::test]
    async fn quote_shape_and_price_range() {
        let lookup = PriceLookup::with_latency(Duration::ZERO);
        let quote = lookup.search(&query("2019")).await.unwrap();

        assert_eq!(quote.id, "Fiat-Uno-2019");
        assert_eq!(quote.fuel, "Gasoline");
        assert!((20_000..120_000).contains(&quote.price));
        assert_eq!(quote.fipe_code.len(), 6);
        assert!(quote.reference_month.contains(" de "));
    }

    #[tokio::test]
    async fn supplied_fuel_is_kept() {
        let lookup = PriceLookup::with_latency(Duration::ZERO);
        let mut q = query("2019");
        q.fuel = Some("Flex".to_string());
        assert_eq!(lookup.search(&q).await.unwrap().fuel, "Flex");
    }

    #[tokio::test]
    async fn year_must_be_plausible() {
        let lookup = PriceLookup::with_latency(Duration::ZERO);
        assert!(matches!(lookup.search(&query("abcd")).await, Err(LookupError::InvalidYear)));
        assert!(matches!(lookup.search(&query("1850")).await, Err(LookupError::InvalidYear)));
        assert!(matches!(lookup.search(&query("3000")).await, Err(LookupError::InvalidYear)));
        assert!(lookup.search(&query("1995")).await.is_ok());
    }

    #[test]
    fn vehicle_kind_parses_the_wire_names() {
        assert_eq!(VehicleKind::parse("cars"), Some(VehicleKind::Cars));
        assert_eq!(VehicleKind::parse("motorcycles"), Some(VehicleKind::Motorcycles));
        assert_eq!(VehicleKind::parse("trucks"), Some(VehicleKind::Trucks));
        assert_eq!(VehicleKind::parse("boats"), None);
    }
}
