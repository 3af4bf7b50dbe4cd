//! Bookmark scanned case files from sparse page anchors.
//!
//! Pages are tagged at a few anchor points; [`bookmark::cascade`] spreads each
//! anchor forward to a label for every page, and [`bookmark::build_outline`]
//! turns that labeling into an ordered set of bookmarks that
//! [`pdf::PdfDocument::set_outline`] writes into the document.

pub mod anchor_spec;
pub mod bookmark;
pub mod config;
pub mod pdf;
