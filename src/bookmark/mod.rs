//! Turns sparse page anchors into a per-page labeling and a bookmark outline.

pub mod assignment;
pub mod cascade;
pub mod error;
pub mod outline;
pub mod session;
pub mod summary;

pub use assignment::{Assignment, Category};
pub use cascade::{cascade, Anchors, Labeling};
pub use error::LabelError;
pub use outline::{build_outline, Outline, OutlineEntry};
pub use session::AnchorStore;
pub use summary::{summarize, Coverage, CoverageSummary, Progress};
