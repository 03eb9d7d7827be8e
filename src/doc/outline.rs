//! Outline (bookmark) tree extraction.
//!
//! The engine keeps outlines as an intrusive linked structure: each node
//! points at its first child (`/First`) and next sibling (`/Next`).
//! [`Document::outline`] mirrors that structure depth-first into an owned
//! tree and returns it; nothing in the result borrows the engine, so the
//! tree stays valid after the document is closed.

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Object, ObjectId};

use crate::doc::document::Document;
use crate::doc::resolve;

/// Nesting cap against pathological or cyclic outline graphs.
const MAX_DEPTH: usize = 64;

/// One outline entry.
///
/// The root returned by [`Document::outline`] is a synthetic holder for the
/// top-level entries and carries no title or link of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    /// Decoded `/Title`, when present.
    pub title: Option<String>,
    /// Link target: a URI action's URI, or `#page=N` for page destinations.
    pub link: Option<String>,
    /// Child entries, in document order.
    pub children: Vec<Outline>,
}

impl Document {
    /// Build the bookmark tree, or `None` when the document has none.
    ///
    /// Absence of an outline is not an error. The sibling order of the
    /// engine structure is preserved exactly.
    pub fn outline(&self) -> Option<Outline> {
        if self.is_locked() {
            return None;
        }
        let engine = self.engine()?;
        let outlines = resolve::catalog(engine)
            .and_then(|catalog| resolve::dict_get(engine, catalog, b"Outlines"))
            .and_then(resolve::as_dict)?;
        let first = outlines.get(b"First").ok()?;

        let pages = page_number_by_id(engine);
        let mut root = Outline::default();
        let mut visited = HashSet::new();
        mirror_siblings(engine, first, &pages, &mut root, &mut visited, 0);

        if root.children.is_empty() {
            None
        } else {
            Some(root)
        }
    }
}

/// Map page object ids to 1-based page numbers for destination resolution.
fn page_number_by_id(engine: &lopdf::Document) -> HashMap<ObjectId, u32> {
    engine
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect()
}

/// Walk one sibling chain, appending a mirrored node per sibling to
/// `parent` and recursing into its children before advancing, so document
/// order is kept.
///
/// Links are usually references, but malformed-yet-real files inline the
/// node dictionary directly; both forms are accepted.
fn mirror_siblings(
    engine: &lopdf::Document,
    first: &Object,
    pages: &HashMap<ObjectId, u32>,
    parent: &mut Outline,
    visited: &mut HashSet<ObjectId>,
    depth: usize,
) {
    if depth >= MAX_DEPTH {
        return;
    }
    let mut current = Some(first);
    while let Some(obj) = current {
        // Malformed files can link nodes into reference cycles.
        if let Object::Reference(id) = obj {
            if !visited.insert(*id) {
                break;
            }
        }
        let Some(node) = resolve::resolve(engine, obj).and_then(resolve::as_dict) else {
            break;
        };

        let mut item = Outline {
            title: resolve::dict_get(engine, node, b"Title")
                .and_then(resolve::as_string)
                .map(resolve::decode_text_string),
            link: link_target(engine, node, pages),
            children: Vec::new(),
        };
        if let Ok(child) = node.get(b"First") {
            mirror_siblings(engine, child, pages, &mut item, visited, depth + 1);
        }
        parent.children.push(item);

        current = node.get(b"Next").ok();
    }
}

/// Derive a link for an outline node: URI actions give their URI; page
/// destinations (a direct `/Dest` or a GoTo action) give `#page=N`.
/// Named (string) destinations stay linkless.
fn link_target(
    engine: &lopdf::Document,
    node: &Dictionary,
    pages: &HashMap<ObjectId, u32>,
) -> Option<String> {
    if let Some(action) = resolve::dict_get(engine, node, b"A").and_then(resolve::as_dict) {
        let kind = resolve::dict_get(engine, action, b"S").and_then(resolve::as_name);
        return match kind {
            Some(name) if name == b"URI" => resolve::dict_get(engine, action, b"URI")
                .and_then(resolve::as_string)
                .map(resolve::decode_text_string),
            Some(name) if name == b"GoTo" => resolve::dict_get(engine, action, b"D")
                .and_then(|dest| dest_page_link(dest, pages)),
            _ => None,
        };
    }
    let dest = resolve::dict_get(engine, node, b"Dest")?;
    dest_page_link(dest, pages)
}

/// An explicit destination is `[page-ref /XYZ ...]`; only that array form
/// with a page reference up front resolves to a link.
fn dest_page_link(dest: &Object, pages: &HashMap<ObjectId, u32>) -> Option<String> {
    let Object::Array(items) = dest else {
        return None;
    };
    let Object::Reference(page_id) = items.first()? else {
        return None;
    };
    pages
        .get(page_id)
        .map(|number| format!("#page={number}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_cycle_guard_terminates() {
        let mut engine = lopdf::Document::with_version("1.5");
        let id = engine.new_object_id();
        // Node whose Next points at itself.
        engine.objects.insert(
            id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Loop"),
                "Next" => id,
            }),
        );

        let pages = HashMap::new();
        let mut root = Outline::default();
        let mut visited = HashSet::new();
        let first = Object::Reference(id);
        mirror_siblings(&engine, &first, &pages, &mut root, &mut visited, 0);

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].title.as_deref(), Some("Loop"));
    }

    #[test]
    fn test_uri_action_link() {
        let mut engine = lopdf::Document::with_version("1.5");
        let id = engine.add_object(dictionary! {
            "Title" => Object::string_literal("Website"),
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::string_literal("https://example.com/"),
            },
        });

        let pages = HashMap::new();
        let mut root = Outline::default();
        let mut visited = HashSet::new();
        let first = Object::Reference(id);
        mirror_siblings(&engine, &first, &pages, &mut root, &mut visited, 0);

        assert_eq!(
            root.children[0].link.as_deref(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn test_direct_first_child_dictionary() {
        // Some files inline the node instead of referencing it.
        let engine = lopdf::Document::with_version("1.5");
        let first = Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("Inline"),
        });

        let pages = HashMap::new();
        let mut root = Outline::default();
        let mut visited = HashSet::new();
        mirror_siblings(&engine, &first, &pages, &mut root, &mut visited, 0);

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].title.as_deref(), Some("Inline"));
    }

    #[test]
    fn test_dest_page_link_resolves_page_number() {
        let mut pages = HashMap::new();
        pages.insert((12, 0), 3);
        let dest = Object::Array(vec![
            Object::Reference((12, 0)),
            Object::Name(b"XYZ".to_vec()),
        ]);
        assert_eq!(dest_page_link(&dest, &pages).as_deref(), Some("#page=3"));
    }

    #[test]
    fn test_named_destination_is_linkless() {
        let pages = HashMap::new();
        let dest = Object::string_literal("chapter-one");
        assert!(dest_page_link(&dest, &pages).is_none());
    }
}
