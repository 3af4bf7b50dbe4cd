use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::bookmark::{Anchors, Assignment};

/// Parse an anchor like "1=index", "3=oa", "5=annexure:2" or "9=custom:Reply"
pub fn parse_anchor(s: &str) -> Result<(u32, Assignment)> {
    let s = s.trim();
    let (page_str, category_str) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid anchor (expected PAGE=CATEGORY): {}", s))?;

    let page = page_str
        .trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid page number in anchor: {}", s))?;
    if page == 0 {
        return Err(anyhow!("Page numbers must be >= 1"));
    }

    let category_str = category_str.trim();
    let (keyword, value) = match category_str.split_once(':') {
        Some((keyword, value)) => (keyword.trim(), Some(value.trim())),
        None => (category_str, None),
    };

    let assignment = match (keyword.to_ascii_lowercase().as_str(), value) {
        ("index", None) => Assignment::index(),
        ("oa" | "original_application" | "original-application", None) => {
            Assignment::original_application()
        }
        ("vakalath", None) => Assignment::vakalath(),
        ("annexure" | "annexures", number) => Assignment::annexure(number.unwrap_or_default()),
        ("custom", Some(name)) if !name.is_empty() => Assignment::custom(name),
        ("custom", _) => return Err(anyhow!("Custom anchor needs a name: {}", s)),
        (_, Some(_)) => return Err(anyhow!("Category does not take a value: {}", s)),
        _ => return Err(anyhow!("Unknown category: {}", keyword)),
    };

    Ok((page, assignment))
}

/// Parse several anchors; a later anchor for the same page replaces the earlier one
pub fn parse_anchors<S: AsRef<str>>(specs: &[S]) -> Result<Anchors> {
    let mut anchors = Anchors::new();
    for spec in specs {
        let (page, assignment) = parse_anchor(spec.as_ref())?;
        anchors.insert(page, assignment);
    }
    Ok(anchors)
}

/// Read a JSON anchor file: `{"1": {"kind": "index"}, "5": {"kind": "annexures", "number": "2"}}`
pub fn load_anchor_file<P: AsRef<Path>>(path: P) -> Result<Anchors> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read anchors: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse anchors: {}", path.display()))
}

/// Anchors from an optional file, overridden by command-line specs
pub fn collect_anchors<S: AsRef<str>>(file: Option<&Path>, specs: &[S]) -> Result<Anchors> {
    let mut anchors = match file {
        Some(path) => load_anchor_file(path)?,
        None => Anchors::new(),
    };
    anchors.extend(parse_anchors(specs)?);
    Ok(anchors)
}
