use anyhow::Result;

use casemark::bookmark::AnchorStore;
use casemark::config::LabelConfig;

pub fn run(store: &AnchorStore, config: &LabelConfig) -> Result<()> {
    let outline = store.outline(config)?;

    if outline.is_empty() {
        println!("No bookmarks to write.");
        return Ok(());
    }

    for entry in outline {
        let indent = "  ".repeat(entry.depth.saturating_sub(1) as usize);
        println!("{}{} (p. {})", indent, entry.title, entry.page);
    }

    Ok(())
}
