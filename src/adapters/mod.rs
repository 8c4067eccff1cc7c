// Adapters layer: concrete implementations of the domain ports.

pub mod price_source;

pub use price_source::{FixedPriceSource, SequencePriceSource, UniformPriceSource};
