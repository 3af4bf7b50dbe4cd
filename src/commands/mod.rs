pub mod apply;
pub mod labels;
pub mod outline;
pub mod summary;
pub mod toc;

use anyhow::{bail, Result};
use std::path::Path;

use casemark::anchor_spec::collect_anchors;
use casemark::bookmark::AnchorStore;
use casemark::config::LabelConfig;
use casemark::pdf::PdfDocument;

use crate::cli::{AnchorArgs, PageSource};

/// Page count from a PDF when one is given, otherwise the explicit count.
pub fn page_count(pdf: Option<&Path>, pages: Option<u32>) -> Result<u32> {
    match (pdf, pages) {
        (Some(path), _) => Ok(PdfDocument::open(path)?.page_count()),
        (None, Some(pages)) => Ok(pages),
        (None, None) => bail!("Either a PDF or a page count is required"),
    }
}

/// Build the anchor store and label config a labeling command works on.
pub fn load_session(source: &PageSource, args: &AnchorArgs) -> Result<(AnchorStore, LabelConfig)> {
    let total_pages = page_count(source.pdf.as_deref(), source.pages)?;
    let anchors = collect_anchors(args.anchors_file.as_deref(), &args.anchors)?;
    let store = AnchorStore::with_anchors(total_pages, anchors)?;
    let config = LabelConfig::load_or_default(args.config.as_deref())?;
    Ok((store, config))
}
