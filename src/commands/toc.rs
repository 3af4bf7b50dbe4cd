use casemark::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let items = doc.outline()?;

    if items.is_empty() {
        println!("No bookmarks found.");
        return Ok(());
    }

    for item in items {
        let indent = "  ".repeat(item.depth.saturating_sub(1) as usize);
        let page_str = item
            .page
            .map(|p| format!(" (p. {})", p))
            .unwrap_or_default();
        println!("{}{}{}", indent, item.title, page_str);
    }

    Ok(())
}
