#![deny(missing_docs)]
//! Core types for FUQ: quantity classification, unit conversion, and the
//! shared error surface.

pub mod errors;
pub mod quantity;
pub mod rng;
pub mod units;

pub use errors::{ErrorInfo, FuqError};
pub use quantity::{
    classify, is_fluct, is_thermo, Category, Ensemble, Fluctuation, QoiSelection, QuantitySpec,
    THERMO_KEYWORDS,
};
pub use rng::{derive_substream_seed, replicate_seed};
pub use units::UnitSystem;
