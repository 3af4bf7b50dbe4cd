use anyhow::Result;

use casemark::bookmark::AnchorStore;
use casemark::config::LabelConfig;

pub fn run(store: &AnchorStore, config: &LabelConfig) -> Result<()> {
    let summary = store.summary(config)?;

    if summary.is_empty() {
        println!("No anchors assigned.");
        return Ok(());
    }

    for coverage in summary.iter() {
        println!(
            "{} • {}p • {}",
            coverage.label,
            coverage.count,
            coverage.range_text()
        );
    }

    let progress = store.progress()?;
    println!(
        "\n{} anchor point(s) → {} page(s) covered ({:.0}%)",
        progress.anchors,
        progress.covered,
        progress.percent()
    );
    println!(
        "{} bookmark(s) for {} page(s)",
        summary.len(),
        progress.covered
    );

    Ok(())
}
