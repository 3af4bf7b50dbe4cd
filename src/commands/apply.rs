use anyhow::{bail, Result};
use std::path::Path;

use casemark::bookmark::{AnchorStore, Anchors};
use casemark::config::LabelConfig;
use casemark::pdf::PdfDocument;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    anchors: Anchors,
    config: &LabelConfig,
) -> Result<()> {
    if anchors.is_empty() {
        bail!("No anchors assigned; nothing to bookmark");
    }

    let mut doc = PdfDocument::open(&input)?;
    let store = AnchorStore::with_anchors(doc.page_count(), anchors)?;
    let outline = store.outline(config)?;

    doc.set_outline(&outline)?;
    doc.save(&output)?;

    println!(
        "Wrote {} bookmark(s) for {} page(s) to {}",
        outline.len(),
        store.total_pages(),
        output.as_ref().display()
    );

    Ok(())
}
