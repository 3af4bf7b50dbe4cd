use log::debug;
use std::collections::BTreeMap;

use super::{Assignment, LabelError};

/// User-set page anchors, keyed by 1-based page number.
pub type Anchors = BTreeMap<u32, Assignment>;

/// One assignment for every page `1..=total_pages`.
pub type Labeling = BTreeMap<u32, Assignment>;

/// Check that every anchor lands inside `1..=total_pages`.
pub fn validate_anchors<'a, I>(anchors: I, total_pages: u32) -> Result<(), LabelError>
where
    I: IntoIterator<Item = &'a u32>,
{
    if total_pages == 0 {
        return Err(LabelError::EmptyDocument);
    }

    let smallest_bad = anchors
        .into_iter()
        .copied()
        .filter(|&p| p == 0 || p > total_pages)
        .min();

    match smallest_bad {
        Some(page) => Err(LabelError::AnchorOutOfRange { page, total_pages }),
        None => Ok(()),
    }
}

/// Spread each anchor's assignment forward up to the page before the next
/// anchor, or to the end of the document.
///
/// No anchors means nothing has been labeled yet, and yields an empty labeling
/// whatever the page count. When the first anchor sits after page 1, the
/// leading pages are labeled Index. The anchor map is read in page order, so
/// the result does not depend on how the map was filled.
pub fn cascade<'a, I>(anchors: I, total_pages: u32) -> Result<Labeling, LabelError>
where
    I: IntoIterator<Item = (&'a u32, &'a Assignment)>,
{
    let mut points: Vec<(u32, &Assignment)> =
        anchors.into_iter().map(|(page, a)| (*page, a)).collect();

    if points.is_empty() {
        return Ok(Labeling::new());
    }

    validate_anchors(points.iter().map(|(page, _)| page), total_pages)?;

    points.sort_by_key(|(page, _)| *page);
    let anchor_count = points.len();

    let leading = Assignment::default();
    if points[0].0 > 1 {
        points.insert(0, (1, &leading));
    }

    let mut labeling = Labeling::new();
    for (i, (start, assignment)) in points.iter().enumerate() {
        let end = points
            .get(i + 1)
            .map(|(next, _)| next - 1)
            .unwrap_or(total_pages)
            .min(total_pages);

        for page in *start..=end {
            labeling.insert(page, (*assignment).clone());
        }
    }

    debug!(
        "cascaded {} anchor(s) over {} page(s)",
        anchor_count,
        total_pages
    );

    Ok(labeling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn anchors(pairs: &[(u32, Assignment)]) -> Anchors {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_single_anchor() {
        let labeling = cascade(&anchors(&[(1, Assignment::index())]), 5).unwrap();
        assert_eq!(labeling.len(), 5);
        assert!(labeling.values().all(|a| *a == Assignment::index()));
    }

    #[test]
    fn test_ranges_end_before_next_anchor() {
        let map = anchors(&[
            (1, Assignment::index()),
            (3, Assignment::original_application()),
            (6, Assignment::annexure("1")),
        ]);
        let labeling = cascade(&map, 8).unwrap();

        let labels: Vec<String> = labeling.values().map(Assignment::label).collect();
        assert_eq!(
            labels,
            vec![
                "Index",
                "Index",
                "Original Application (OA)",
                "Original Application (OA)",
                "Original Application (OA)",
                "Annexure A1",
                "Annexure A1",
                "Annexure A1",
            ]
        );
    }

    #[test]
    fn test_prefix_defaults_to_index() {
        let labeling = cascade(&anchors(&[(4, Assignment::vakalath())]), 6).unwrap();
        for page in 1..=3 {
            assert_eq!(labeling[&page], Assignment::index());
        }
        for page in 4..=6 {
            assert_eq!(labeling[&page], Assignment::vakalath());
        }
    }

    #[test]
    fn test_covers_every_page_once() {
        let map = anchors(&[
            (2, Assignment::annexure("2")),
            (7, Assignment::custom("Reply")),
            (9, Assignment::annexure("A")),
        ]);
        let labeling = cascade(&map, 12).unwrap();
        let pages: Vec<u32> = labeling.keys().copied().collect();
        assert_eq!(pages, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_anchor_on_last_page() {
        let map = anchors(&[(1, Assignment::index()), (5, Assignment::vakalath())]);
        let labeling = cascade(&map, 5).unwrap();
        assert_eq!(labeling.len(), 5);
        assert_eq!(labeling[&5], Assignment::vakalath());
        assert_eq!(labeling[&4], Assignment::index());
    }

    #[test]
    fn test_no_anchors() {
        assert!(cascade(&Anchors::new(), 10).unwrap().is_empty());
        assert!(cascade(&Anchors::new(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_document() {
        let map = anchors(&[(1, Assignment::index())]);
        assert_eq!(cascade(&map, 0), Err(LabelError::EmptyDocument));
    }

    #[test]
    fn test_out_of_range_anchor_rejected() {
        let map = anchors(&[(1, Assignment::index()), (11, Assignment::vakalath())]);
        assert_eq!(
            cascade(&map, 10),
            Err(LabelError::AnchorOutOfRange {
                page: 11,
                total_pages: 10
            })
        );

        let several = anchors(&[(0, Assignment::index()), (15, Assignment::vakalath())]);
        assert_eq!(
            cascade(&several, 10),
            Err(LabelError::AnchorOutOfRange {
                page: 0,
                total_pages: 10
            })
        );

        let zero = anchors(&[(0, Assignment::index())]);
        assert_eq!(
            cascade(&zero, 10),
            Err(LabelError::AnchorOutOfRange {
                page: 0,
                total_pages: 10
            })
        );
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let pairs = [
            (9, Assignment::annexure("2")),
            (1, Assignment::index()),
            (4, Assignment::original_application()),
        ];

        let forward: HashMap<u32, Assignment> = pairs.iter().cloned().collect();
        let backward: HashMap<u32, Assignment> = pairs.iter().rev().cloned().collect();
        let ordered: Anchors = pairs.iter().cloned().collect();

        let expected = cascade(&ordered, 12).unwrap();
        assert_eq!(cascade(&forward, 12).unwrap(), expected);
        assert_eq!(cascade(&backward, 12).unwrap(), expected);
    }

    #[test]
    fn test_repeatable() {
        let map = anchors(&[(3, Assignment::annexure("1")), (6, Assignment::index())]);
        assert_eq!(cascade(&map, 9).unwrap(), cascade(&map, 9).unwrap());
    }

    #[test]
    fn test_input_untouched() {
        let map = anchors(&[(3, Assignment::annexure("1"))]);
        let before = map.clone();
        cascade(&map, 9).unwrap();
        assert_eq!(map, before);
    }
}
