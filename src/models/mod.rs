//! Data models

pub mod features;
pub mod prediction;
pub mod sensor;
pub mod dataset;

pub use features::*;
pub use prediction::*;
pub use sensor::*;
pub use dataset::*;
