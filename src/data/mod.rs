//! Dataset loading and preprocessing

mod dataset;
mod preprocessing;

pub use dataset::Dataset;
pub use preprocessing::*;
