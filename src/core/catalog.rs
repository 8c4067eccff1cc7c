use crate::config::toml_config::{default_regions, RegionConfig};
use crate::domain::model::{Coordinates, Region, RegionMarker};
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::validate_unique_names;

/// Ordered, immutable set of regions. Position in the catalog is the region's
/// index for price adjustment and the tie-break key for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        validate_unique_names("regions", regions.iter().map(|r| r.name.as_str()))?;
        Ok(Self { regions })
    }

    pub fn from_config(regions: &[RegionConfig]) -> Result<Self> {
        Self::new(regions.iter().map(region_from_config).collect())
    }

    pub fn australian() -> Self {
        Self {
            regions: default_regions().iter().map(region_from_config).collect(),
        }
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.regions
            .iter()
            .position(|region| region.name == name)
            .ok_or_else(|| EngineError::unknown_region(name))
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Display-only markers for regions with reference coordinates.
    pub fn markers(&self) -> Vec<RegionMarker> {
        self.regions
            .iter()
            .filter_map(|region| {
                region.coordinates.map(|coordinates| RegionMarker {
                    name: region.name.clone(),
                    coordinates,
                    reference_price: region.reference_price,
                })
            })
            .collect()
    }
}

fn region_from_config(cfg: &RegionConfig) -> Region {
    Region {
        name: cfg.name.clone(),
        coordinates: cfg
            .latitude
            .zip(cfg.longitude)
            .map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            }),
        reference_price: cfg.reference_price,
    }
}
