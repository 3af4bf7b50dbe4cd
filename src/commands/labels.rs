use anyhow::Result;

use casemark::bookmark::AnchorStore;
use casemark::config::LabelConfig;

pub fn run(store: &AnchorStore, config: &LabelConfig) -> Result<()> {
    let labeling = store.labeling()?;

    if labeling.is_empty() {
        println!("No anchors assigned.");
        return Ok(());
    }

    let width = store.total_pages().to_string().len();
    for (page, assignment) in &labeling {
        let marker = if store.is_anchor(*page) {
            "anchor"
        } else {
            "inherited"
        };
        println!(
            "{:>width$}  {}  ({})",
            page,
            assignment.resolve(config),
            marker,
            width = width
        );
    }

    Ok(())
}
