use thiserror::Error;

/// Conditions the labeling engine refuses to work with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Anchor on page {page} is out of range (1-{total_pages})")]
    AnchorOutOfRange { page: u32, total_pages: u32 },
}
