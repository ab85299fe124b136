//! # Scorecard Core Types
//!
//! The shared vocabulary of the workspace: the five Balanced-Scorecard entities as
//! they arrive from the retrieval side, the classification enums the engine emits,
//! and the lenient numeric parsing every calculation relies on.
//!
//! As a Layer 0 crate it has no knowledge of the engine or of configuration.

pub mod enums;
pub mod error;
pub mod numeric;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{
    CoverageTier, PerformanceTier, PerspectiveCategory, ProgressTier, Status, Trend,
};
pub use error::CoreError;
pub use numeric::{parse_decimal, parse_or};
pub use structs::{
    Dataset, HistoricalRecord, Initiative, Kpi, Objective, Perspective, PerspectiveId,
    PerspectiveRef, UNRESOLVED,
};
