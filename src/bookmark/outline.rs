use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

use super::summary::{group_by_label, LabelGroup};
use super::Labeling;
use crate::config::LabelConfig;

/// One bookmark: nesting depth (1 is top level), title and 1-based target page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub depth: u32,
    pub title: String,
    pub page: u32,
}

pub type Outline = Vec<OutlineEntry>;

/// Build the bookmark outline for a labeling: one top-level entry per resolved
/// label, pointing at the first page carrying it.
///
/// Entries are ordered by the configured leading labels (Index, then Original
/// Application by default), then annexures, then everything else in the order
/// it first appears in the document. Annexures with purely numeric tokens sort
/// by value and come before all other annexure tokens, which sort as text.
pub fn build_outline(labeling: &Labeling, config: &LabelConfig) -> Outline {
    let groups = group_by_label(labeling, config);

    let outline: Outline = order_groups(&groups, config)
        .into_iter()
        .filter_map(|group| {
            group.pages.first().map(|&page| OutlineEntry {
                depth: 1,
                title: group.label.clone(),
                page,
            })
        })
        .collect();

    debug!(
        "built {} bookmark(s) from {} labeled page(s)",
        outline.len(),
        labeling.len()
    );

    outline
}

fn order_groups<'a>(groups: &'a [LabelGroup], config: &LabelConfig) -> Vec<&'a LabelGroup> {
    let mut placed = vec![false; groups.len()];
    let mut ordered = Vec::with_capacity(groups.len());

    for lead in &config.leading {
        if let Some(i) = groups.iter().position(|g| &g.label == lead) {
            if !placed[i] {
                placed[i] = true;
                ordered.push(&groups[i]);
            }
        }
    }

    let mut annexures: Vec<(usize, &str)> = groups
        .iter()
        .enumerate()
        .filter(|(i, _)| !placed[*i])
        .filter_map(|(i, g)| {
            g.label
                .strip_prefix(config.annexure_prefix.as_str())
                .map(|token| (i, token))
        })
        .collect();
    // Stable, so tokens of equal value ("1", "01") keep document order.
    annexures.sort_by(|a, b| compare_annexure_tokens(a.1, b.1));

    for (i, _) in annexures {
        placed[i] = true;
        ordered.push(&groups[i]);
    }

    for (i, group) in groups.iter().enumerate() {
        if !placed[i] {
            ordered.push(group);
        }
    }

    ordered
}

fn numeric_token(token: &str) -> Option<&str> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        Some(token.trim_start_matches('0'))
    } else {
        None
    }
}

/// Numeric tokens by value, then everything else as text.
fn compare_annexure_tokens(a: &str, b: &str) -> Ordering {
    match (numeric_token(a), numeric_token(b)) {
        // Leading zeros stripped, so a shorter digit string is a smaller number.
        (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
