//! Principal Component Analysis: hand-rolled pipeline, library reference
//! and the agreement check between the two

mod analysis;
mod compare;
mod decomposition;
mod exact;

pub use analysis::PcaModel;
pub use compare::{ComparisonReport, ComponentAgreement};
pub use decomposition::*;
pub use exact::ExactPca;
