use anyhow::{bail, Context, Result};
use log::{info, warn};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, StringFormat};
use std::collections::BTreeMap;

use super::encode_pdf_string;
use crate::bookmark::OutlineEntry;

struct OutlineNode {
    id: ObjectId,
    title: String,
    page_id: ObjectId,
    children: Vec<OutlineNode>,
}

/// Replace the document outline with `entries`.
///
/// Any existing outline is dropped, not merged. Entries nest by depth: the
/// first is at depth 1 and each may go at most one level deeper than the one
/// before it. An empty list removes the outline altogether.
pub fn write_outline(doc: &mut Document, entries: &[OutlineEntry]) -> Result<()> {
    let page_ids = doc.get_pages();
    check_entries(entries, &page_ids)?;

    let catalog = catalog_mut(doc)?;
    let replaced = catalog.remove(b"Outlines").is_some();
    if entries.is_empty() {
        if matches!(catalog.get(b"PageMode"), Ok(Object::Name(mode)) if mode == b"UseOutlines") {
            catalog.remove(b"PageMode");
        }
    } else {
        let mut pos = 0;
        let roots = collect_level(doc, entries, &mut pos, 1, &page_ids);
        let root_id = write_root(doc, &roots);

        let catalog = catalog_mut(doc)?;
        catalog.set("Outlines", root_id);
        catalog.set("PageMode", "UseOutlines");
    }

    if replaced {
        warn!("replaced existing document outline");
        // Items of the old outline are now unreachable.
        doc.prune_objects();
    }

    info!("wrote {} bookmark(s)", entries.len());
    Ok(())
}

fn check_entries(entries: &[OutlineEntry], page_ids: &BTreeMap<u32, ObjectId>) -> Result<()> {
    let mut previous_depth = 0;
    for entry in entries {
        if entry.depth == 0 || entry.depth > previous_depth + 1 {
            bail!(
                "Bookmark '{}' has depth {} after depth {}",
                entry.title,
                entry.depth,
                previous_depth
            );
        }
        if !page_ids.contains_key(&entry.page) {
            bail!(
                "Bookmark '{}' targets page {} which is out of range (1-{})",
                entry.title,
                entry.page,
                page_ids.len()
            );
        }
        previous_depth = entry.depth;
    }
    Ok(())
}

fn catalog_mut(doc: &mut Document) -> Result<&mut Dictionary> {
    let root = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .context("Document has no catalog")?;
    doc.get_object_mut(root)
        .and_then(Object::as_dict_mut)
        .context("Document catalog is not a dictionary")
}

/// Consume consecutive entries at `depth` (and their deeper children) starting at `pos`.
fn collect_level(
    doc: &mut Document,
    entries: &[OutlineEntry],
    pos: &mut usize,
    depth: u32,
    page_ids: &BTreeMap<u32, ObjectId>,
) -> Vec<OutlineNode> {
    let mut nodes = Vec::new();

    while let Some(entry) = entries.get(*pos) {
        if entry.depth < depth {
            break;
        }
        *pos += 1;

        let id = doc.new_object_id();
        let children = collect_level(doc, entries, pos, depth + 1, page_ids);
        nodes.push(OutlineNode {
            id,
            title: entry.title.clone(),
            page_id: page_ids[&entry.page],
            children,
        });
    }

    nodes
}

fn write_root(doc: &mut Document, roots: &[OutlineNode]) -> ObjectId {
    let root_id = doc.new_object_id();
    let (first, last) = (roots[0].id, roots[roots.len() - 1].id);
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => roots.len() as i64,
        }),
    );
    write_level(doc, roots, root_id);
    root_id
}

fn write_level(doc: &mut Document, nodes: &[OutlineNode], parent_id: ObjectId) {
    for (i, node) in nodes.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => Object::String(encode_pdf_string(&node.title), StringFormat::Literal),
            "Parent" => parent_id,
            "Dest" => vec![Object::Reference(node.page_id), "Fit".into()],
        };
        if i > 0 {
            dict.set("Prev", nodes[i - 1].id);
        }
        if let Some(next) = nodes.get(i + 1) {
            dict.set("Next", next.id);
        }
        if let (Some(first), Some(last)) = (node.children.first(), node.children.last()) {
            dict.set("First", first.id);
            dict.set("Last", last.id);
            // Negative: children start collapsed.
            dict.set("Count", -(node.children.len() as i64));
            write_level(doc, &node.children, node.id);
        }
        doc.objects.insert(node.id, Object::Dictionary(dict));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::blank_document;
    use crate::pdf::toc::read_outline;

    fn entry(depth: u32, title: &str, page: u32) -> OutlineEntry {
        OutlineEntry {
            depth,
            title: title.to_string(),
            page,
        }
    }

    fn read_back(doc: &Document) -> Vec<(u32, String, Option<u32>)> {
        read_outline(doc)
            .unwrap()
            .into_iter()
            .map(|item| (item.depth, item.title, item.page))
            .collect()
    }

    #[test]
    fn test_flat_outline() {
        let mut doc = blank_document(8);
        write_outline(
            &mut doc,
            &[
                entry(1, "Index", 1),
                entry(1, "Original Application (OA)", 3),
                entry(1, "Annexure A1", 7),
            ],
        )
        .unwrap();

        assert_eq!(
            read_back(&doc),
            vec![
                (1, "Index".to_string(), Some(1)),
                (1, "Original Application (OA)".to_string(), Some(3)),
                (1, "Annexure A1".to_string(), Some(7)),
            ]
        );

        let catalog = doc.catalog().unwrap();
        assert!(matches!(catalog.get(b"PageMode"), Ok(Object::Name(mode)) if mode == b"UseOutlines"));
    }

    #[test]
    fn test_replaces_existing_outline() {
        let mut doc = blank_document(4);
        write_outline(&mut doc, &[entry(1, "Old A", 1), entry(1, "Old B", 2)]).unwrap();
        let objects_before = doc.objects.len();

        write_outline(&mut doc, &[entry(1, "Index", 1)]).unwrap();

        assert_eq!(read_back(&doc), vec![(1, "Index".to_string(), Some(1))]);
        assert!(doc.objects.len() < objects_before);
    }

    #[test]
    fn test_nested_entries() {
        let mut doc = blank_document(6);
        write_outline(
            &mut doc,
            &[
                entry(1, "Annexures", 2),
                entry(2, "Annexure A1", 2),
                entry(2, "Annexure A2", 4),
                entry(1, "Vakalath", 6),
            ],
        )
        .unwrap();

        assert_eq!(
            read_back(&doc),
            vec![
                (1, "Annexures".to_string(), Some(2)),
                (2, "Annexure A1".to_string(), Some(2)),
                (2, "Annexure A2".to_string(), Some(4)),
                (1, "Vakalath".to_string(), Some(6)),
            ]
        );
    }

    #[test]
    fn test_unicode_titles() {
        let mut doc = blank_document(2);
        write_outline(&mut doc, &[entry(1, "Pièce jointe", 2)]).unwrap();
        assert_eq!(read_back(&doc), vec![(1, "Pièce jointe".to_string(), Some(2))]);
    }

    #[test]
    fn test_rejects_bad_entries() {
        let mut doc = blank_document(3);
        assert!(write_outline(&mut doc, &[entry(1, "Index", 4)]).is_err());
        assert!(write_outline(&mut doc, &[entry(2, "Index", 1)]).is_err());
        assert!(write_outline(&mut doc, &[entry(1, "A", 1), entry(3, "B", 2)]).is_err());
        assert!(read_outline(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_empty_removes_outline() {
        let mut doc = blank_document(3);
        write_outline(&mut doc, &[entry(1, "Index", 1)]).unwrap();
        write_outline(&mut doc, &[]).unwrap();

        assert!(read_outline(&doc).unwrap().is_empty());
        assert!(doc.catalog().unwrap().get(b"PageMode").is_err());
    }
}
