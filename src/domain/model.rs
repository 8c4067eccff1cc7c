use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A named market in the catalog. Reference data is display-only and never
/// feeds a price computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub reference_price: Option<u64>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: None,
            reference_price: None,
        }
    }

    pub fn with_reference(mut self, latitude: f64, longitude: f64, price: u64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self.reference_price = Some(price);
        self
    }
}

/// Map marker for a region that carries reference coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMarker {
    pub name: String,
    pub coordinates: Coordinates,
    pub reference_price: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    pub near_transport: bool,
    pub pet_friendly: bool,
    pub low_crime: bool,
}

impl PreferenceSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> u8 {
        u8::from(self.near_transport) + u8::from(self.pet_friendly) + u8::from(self.low_crime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub region: String,
    pub rooms: u32,
    pub preferences: PreferenceSet,
    pub budget: u64,
}

/// Informational decomposition of a predicted price. Only the total is a
/// stable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub base: u64,
    pub room_adjustment: u64,
    pub region_adjustment: u64,
    pub preference_bonus: u64,
}

impl PriceBreakdown {
    pub fn total(&self) -> u64 {
        self.base
            .saturating_add(self.room_adjustment)
            .saturating_add(self.region_adjustment)
            .saturating_add(self.preference_bonus)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub region: String,
    pub price: u64,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub first: PredictionResult,
    pub second: PredictionResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationEntry {
    pub region: String,
    pub catalog_index: usize,
    pub score: u8,
    pub price: u64,
}

/// Every catalog region, ranked by score descending with catalog order
/// breaking ties. Display code truncates with [`RecommendationList::top`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecommendationList {
    entries: Vec<RecommendationEntry>,
}

impl RecommendationList {
    pub(crate) fn from_ranked(entries: Vec<RecommendationEntry>) -> Self {
        Self { entries }
    }

    pub fn top(&self, k: usize) -> &[RecommendationEntry] {
        &self.entries[..k.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[RecommendationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecommendationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RecommendationEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a RecommendationList {
    type Item = &'a RecommendationEntry;
    type IntoIter = std::slice::Iter<'a, RecommendationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetOutcome {
    WithinBudget,
    OverBudget { deficit: u64 },
}

impl BudgetOutcome {
    pub fn is_within_budget(&self) -> bool {
        matches!(self, Self::WithinBudget)
    }
}
