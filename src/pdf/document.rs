use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;

use super::outline::write_outline;
use super::toc::{read_outline, TocItem};
use crate::bookmark::OutlineEntry;

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    pub fn outline(&self) -> Result<Vec<TocItem>> {
        read_outline(&self.doc)
    }

    /// Replace the document's bookmarks with `entries`.
    pub fn set_outline(&mut self, entries: &[OutlineEntry]) -> Result<()> {
        write_outline(&mut self.doc, entries)
            .with_context(|| format!("Failed to write bookmarks to {}", self.path))?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.doc
            .save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}
