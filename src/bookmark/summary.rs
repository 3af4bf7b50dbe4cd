use serde::Serialize;
use std::collections::HashMap;

use super::Labeling;
use crate::config::LabelConfig;

/// Pages sharing one resolved label, in ascending page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabelGroup {
    pub label: String,
    pub pages: Vec<u32>,
}

/// Group pages by resolved label. Groups come out in order of first occurrence.
pub(crate) fn group_by_label(labeling: &Labeling, config: &LabelConfig) -> Vec<LabelGroup> {
    let mut groups: Vec<LabelGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (&page, assignment) in labeling {
        let label = assignment.resolve(config);
        match index.get(&label) {
            Some(&i) => groups[i].pages.push(page),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(LabelGroup {
                    label,
                    pages: vec![page],
                });
            }
        }
    }

    groups
}

/// How many pages carry a label, and the span they occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub label: String,
    pub count: usize,
    pub first: u32,
    pub last: u32,
}

impl Coverage {
    /// "4" for a single page, "4-9" otherwise.
    pub fn range_text(&self) -> String {
        if self.first == self.last {
            self.first.to_string()
        } else {
            format!("{}-{}", self.first, self.last)
        }
    }
}

/// Per-label coverage, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverageSummary(Vec<Coverage>);

impl CoverageSummary {
    pub fn get(&self, label: &str) -> Option<&Coverage> {
        self.0.iter().find(|c| c.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coverage> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Count and span of the pages under each resolved label.
///
/// A label's pages need not be contiguous: two Index anchors around an
/// annexure give one Index entry spanning both ranges.
pub fn summarize(labeling: &Labeling, config: &LabelConfig) -> CoverageSummary {
    let entries = group_by_label(labeling, config)
        .into_iter()
        .filter_map(|group| {
            let first = *group.pages.first()?;
            let last = *group.pages.last()?;
            Some(Coverage {
                label: group.label,
                count: group.pages.len(),
                first,
                last,
            })
        })
        .collect();

    CoverageSummary(entries)
}

/// Anchor count against the pages the cascade covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub anchors: usize,
    pub covered: usize,
    pub total_pages: u32,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.covered as f64 * 100.0 / self.total_pages as f64
    }
}
