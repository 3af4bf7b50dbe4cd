use anyhow::{Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};

use super::decode_pdf_string;

/// A bookmark read back from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    /// Nesting depth; top-level bookmarks are 1.
    pub depth: u32,
    pub title: String,
    /// Target page, when the destination resolves to one.
    pub page: Option<u32>,
}

/// Read the document outline as a flat, depth-annotated list in display order.
pub fn read_outline(doc: &Document) -> Result<Vec<TocItem>> {
    let catalog = doc
        .catalog()
        .with_context(|| "Failed to get document catalog")?;

    let Some(outlines) = catalog
        .get(b"Outlines")
        .ok()
        .and_then(|obj| resolve_dict(doc, obj))
    else {
        return Ok(Vec::new());
    };

    let Ok(Object::Reference(first)) = outlines.get(b"First") else {
        return Ok(Vec::new());
    };

    let pages: HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(num, id)| (id, num))
        .collect();

    let mut items = Vec::new();
    let mut seen = HashSet::new();
    walk_items(doc, *first, 1, &pages, &mut seen, &mut items);
    Ok(items)
}

fn walk_items(
    doc: &Document,
    first: ObjectId,
    depth: u32,
    pages: &HashMap<ObjectId, u32>,
    seen: &mut HashSet<ObjectId>,
    items: &mut Vec<TocItem>,
) {
    let mut current = Some(first);

    // `seen` guards against Next/First chains that loop back on themselves.
    while let Some(id) = current.filter(|id| seen.insert(*id)) {
        let Ok(dict) = doc.get_dictionary(id) else {
            break;
        };

        let title = match dict.get(b"Title") {
            Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
            _ => "Untitled".to_string(),
        };

        items.push(TocItem {
            depth,
            title,
            page: item_page(doc, dict, pages),
        });

        if let Ok(Object::Reference(child)) = dict.get(b"First") {
            walk_items(doc, *child, depth + 1, pages, seen, items);
        }

        current = match dict.get(b"Next") {
            Ok(Object::Reference(next)) => Some(*next),
            _ => None,
        };
    }
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        _ => None,
    }
}

fn item_page(doc: &Document, item: &Dictionary, pages: &HashMap<ObjectId, u32>) -> Option<u32> {
    if let Ok(dest) = item.get(b"Dest") {
        return resolve_destination(doc, dest, pages, 0);
    }

    let action = resolve_dict(doc, item.get(b"A").ok()?)?;
    match action.get(b"S") {
        Ok(Object::Name(kind)) if kind == b"GoTo" => {
            resolve_destination(doc, action.get(b"D").ok()?, pages, 0)
        }
        _ => None,
    }
}

// Named destinations can point at further references; cap how far we follow them.
const MAX_DEST_HOPS: u32 = 8;

fn resolve_destination(
    doc: &Document,
    dest: &Object,
    pages: &HashMap<ObjectId, u32>,
    hops: u32,
) -> Option<u32> {
    if hops > MAX_DEST_HOPS {
        return None;
    }

    match dest {
        Object::Array(arr) => match arr.first() {
            Some(Object::Reference(page)) => pages.get(page).copied(),
            // Remote-style destinations carry a 0-based page index instead.
            Some(Object::Integer(index)) => u32::try_from(*index).ok().map(|i| i + 1),
            _ => None,
        },
        Object::Dictionary(dict) => resolve_destination(doc, dict.get(b"D").ok()?, pages, hops + 1),
        Object::Reference(id) => {
            resolve_destination(doc, doc.get_object(*id).ok()?, pages, hops + 1)
        }
        Object::String(name, _) | Object::Name(name) => {
            let target = named_destination(doc, name)?;
            resolve_destination(doc, target, pages, hops + 1)
        }
        _ => None,
    }
}

/// Look a destination name up in the catalog's Names/Dests tree, then in the
/// older Dests dictionary.
fn named_destination<'a>(doc: &'a Document, name: &[u8]) -> Option<&'a Object> {
    let catalog = doc.catalog().ok()?;

    let from_tree = catalog
        .get(b"Names")
        .ok()
        .and_then(|names| resolve_dict(doc, names))
        .and_then(|names| names.get(b"Dests").ok())
        .and_then(|tree| resolve_dict(doc, tree))
        .and_then(|tree| search_name_tree(doc, tree, name, 0));

    from_tree.or_else(|| {
        let dests = resolve_dict(doc, catalog.get(b"Dests").ok()?)?;
        dests.get(name).ok()
    })
}

fn search_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    name: &[u8],
    level: u32,
) -> Option<&'a Object> {
    if level > MAX_DEST_HOPS {
        return None;
    }

    if let Ok(Object::Array(names)) = node.get(b"Names") {
        let found = names.chunks_exact(2).find_map(|pair| match &pair[0] {
            Object::String(key, _) if key.as_slice() == name => Some(&pair[1]),
            _ => None,
        });
        if found.is_some() {
            return found;
        }
    }

    let Ok(Object::Array(kids)) = node.get(b"Kids") else {
        return None;
    };
    kids.iter()
        .filter_map(|kid| resolve_dict(doc, kid))
        .find_map(|kid| search_name_tree(doc, kid, name, level + 1))
}
