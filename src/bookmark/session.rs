use super::cascade::validate_anchors;
use super::summary::summarize;
use super::{
    build_outline, cascade, Anchors, Assignment, CoverageSummary, LabelError, Labeling, Outline,
    Progress,
};
use crate::config::LabelConfig;

/// Anchors for one document, owned by whoever edits them.
///
/// Only anchors are stored. Labeling, outline and coverage are recomputed from
/// them on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorStore {
    total_pages: u32,
    anchors: Anchors,
}

impl AnchorStore {
    pub fn new(total_pages: u32) -> Self {
        AnchorStore {
            total_pages,
            anchors: Anchors::new(),
        }
    }

    /// Adopt an existing anchor map, rejecting pages outside the document.
    pub fn with_anchors(total_pages: u32, anchors: Anchors) -> Result<Self, LabelError> {
        if !anchors.is_empty() {
            validate_anchors(anchors.keys(), total_pages)?;
        }
        Ok(AnchorStore {
            total_pages,
            anchors,
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn is_anchor(&self, page: u32) -> bool {
        self.anchors.contains_key(&page)
    }

    /// Record an anchor, replacing any anchor already on that page.
    pub fn set(&mut self, page: u32, assignment: Assignment) -> Result<Option<Assignment>, LabelError> {
        validate_anchors([&page], self.total_pages)?;
        Ok(self.anchors.insert(page, assignment))
    }

    /// Apply an edit to a page. An anchor is only recorded when the edit
    /// changes what the page currently shows; re-selecting the inherited
    /// assignment leaves the anchors alone. Returns whether anything changed.
    pub fn assign(&mut self, page: u32, assignment: Assignment) -> Result<bool, LabelError> {
        validate_anchors([&page], self.total_pages)?;
        if self.effective(page) == assignment {
            return Ok(false);
        }
        self.anchors.insert(page, assignment);
        Ok(true)
    }

    pub fn remove(&mut self, page: u32) -> Option<Assignment> {
        self.anchors.remove(&page)
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    /// What a page shows: its own anchor, else the nearest anchor before it,
    /// else the leading Index default.
    pub fn effective(&self, page: u32) -> Assignment {
        self.anchors
            .range(..=page)
            .next_back()
            .map(|(_, assignment)| assignment.clone())
            .unwrap_or_default()
    }

    pub fn labeling(&self) -> Result<Labeling, LabelError> {
        cascade(&self.anchors, self.total_pages)
    }

    pub fn outline(&self, config: &LabelConfig) -> Result<Outline, LabelError> {
        Ok(build_outline(&self.labeling()?, config))
    }

    pub fn summary(&self, config: &LabelConfig) -> Result<CoverageSummary, LabelError> {
        Ok(summarize(&self.labeling()?, config))
    }

    pub fn progress(&self) -> Result<Progress, LabelError> {
        Ok(Progress {
            anchors: self.anchors.len(),
            covered: self.labeling()?.len(),
            total_pages: self.total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_inherits_from_previous_anchor() {
        let mut store = AnchorStore::new(10);
        store.set(3, Assignment::annexure("1")).unwrap();
        store.set(7, Assignment::vakalath()).unwrap();

        assert_eq!(store.effective(1), Assignment::index());
        assert_eq!(store.effective(3), Assignment::annexure("1"));
        assert_eq!(store.effective(6), Assignment::annexure("1"));
        assert_eq!(store.effective(10), Assignment::vakalath());
    }

    #[test]
    fn test_assign_skips_inherited_value() {
        let mut store = AnchorStore::new(10);
        assert!(store.assign(2, Assignment::annexure("1")).unwrap());
        assert!(!store.assign(5, Assignment::annexure("1")).unwrap());
        assert!(!store.is_anchor(5));
        assert!(!store.assign(1, Assignment::index()).unwrap());
        assert!(store.assign(5, Assignment::annexure("2")).unwrap());
        assert_eq!(store.anchors().len(), 2);
    }

    #[test]
    fn test_assign_blank_custom_name_is_inherited_value() {
        let mut store = AnchorStore::new(6);
        store.set(2, Assignment::annexure("1")).unwrap();
        assert!(!store
            .assign(4, Assignment::annexure("1").with_custom_name(""))
            .unwrap());
        assert!(!store.is_anchor(4));
        assert_eq!(store.anchors().len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = AnchorStore::new(4);
        assert_eq!(store.set(2, Assignment::vakalath()).unwrap(), None);
        assert_eq!(
            store.set(2, Assignment::index()).unwrap(),
            Some(Assignment::vakalath())
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut store = AnchorStore::new(4);
        assert_eq!(
            store.set(5, Assignment::index()),
            Err(LabelError::AnchorOutOfRange {
                page: 5,
                total_pages: 4
            })
        );
        assert!(store.assign(0, Assignment::index()).is_err());
        assert!(store.anchors().is_empty());

        let mut empty = AnchorStore::new(0);
        assert_eq!(
            empty.set(1, Assignment::index()),
            Err(LabelError::EmptyDocument)
        );
    }

    #[test]
    fn test_with_anchors_validates() {
        let anchors: Anchors = [(1, Assignment::index()), (9, Assignment::vakalath())]
            .into_iter()
            .collect();
        assert!(AnchorStore::with_anchors(8, anchors.clone()).is_err());
        assert!(AnchorStore::with_anchors(9, anchors).is_ok());
        assert!(AnchorStore::with_anchors(0, Anchors::new()).is_ok());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = AnchorStore::new(6);
        store.set(1, Assignment::index()).unwrap();
        store.set(4, Assignment::original_application()).unwrap();
        store.clear();

        assert!(store.labeling().unwrap().is_empty());
        assert!(store.outline(&LabelConfig::default()).unwrap().is_empty());
        assert_eq!(store.progress().unwrap().covered, 0);
    }

    #[test]
    fn test_progress_and_summary() {
        let mut store = AnchorStore::new(20);
        store.set(5, Assignment::original_application()).unwrap();
        store.set(12, Assignment::annexure("1")).unwrap();

        let progress = store.progress().unwrap();
        assert_eq!(progress.anchors, 2);
        assert_eq!(progress.covered, 20);
        assert_eq!(progress.percent(), 100.0);

        let summary = store.summary(&LabelConfig::default()).unwrap();
        assert_eq!(summary.get("Index").unwrap().count, 4);
        assert_eq!(summary.get("Annexure A1").unwrap().last, 20);
    }

    #[test]
    fn test_remove_anchor_recascades() {
        let mut store = AnchorStore::new(6);
        store.set(1, Assignment::index()).unwrap();
        store.set(4, Assignment::vakalath()).unwrap();
        assert_eq!(store.remove(4), Some(Assignment::vakalath()));

        let labeling = store.labeling().unwrap();
        assert!(labeling.values().all(|a| *a == Assignment::index()));
    }
}
