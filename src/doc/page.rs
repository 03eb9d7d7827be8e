//! Page collaborator boundary.
//!
//! Rendering and content-stream interpretation live outside this crate;
//! [`Page`] is the constructed-by-value handle those collaborators consume.
//! It borrows the engine document, so it cannot outlive the `Document`
//! that produced it.

use lopdf::{Dictionary, Object, ObjectId};

use crate::doc::resolve;

/// MediaBox is inheritable through the page tree; cap the Parent walk.
const MAX_PARENT_HOPS: usize = 32;

/// A borrowed handle to one page of an open document.
#[derive(Debug, Clone, Copy)]
pub struct Page<'doc> {
    engine: &'doc lopdf::Document,
    id: ObjectId,
    index: usize,
}

impl<'doc> Page<'doc> {
    pub(crate) fn new(engine: &'doc lopdf::Document, index: usize) -> Option<Page<'doc>> {
        let number = u32::try_from(index).ok()?.checked_add(1)?;
        let id = engine.get_pages().get(&number).copied()?;
        Some(Page { engine, id, index })
    }

    /// Zero-based index of this page within the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Engine object id of the page dictionary.
    pub fn object_id(&self) -> ObjectId {
        self.id
    }

    /// Page size in points from the effective MediaBox, when one resolves.
    pub fn media_box(&self) -> Option<(f32, f32)> {
        let mut dict = self.dict()?;
        for _ in 0..MAX_PARENT_HOPS {
            if let Some(size) = media_box_of(self.engine, dict) {
                return Some(size);
            }
            dict = resolve::dict_get(self.engine, dict, b"Parent").and_then(resolve::as_dict)?;
        }
        None
    }

    fn dict(&self) -> Option<&'doc Dictionary> {
        self.engine.get_object(self.id).ok().and_then(resolve::as_dict)
    }
}

fn media_box_of(engine: &lopdf::Document, dict: &Dictionary) -> Option<(f32, f32)> {
    let rect = match resolve::dict_get(engine, dict, b"MediaBox")? {
        Object::Array(items) if items.len() == 4 => items,
        _ => return None,
    };
    let x0 = number(&rect[0])?;
    let y0 = number(&rect[1])?;
    let x1 = number(&rect[2])?;
    let y1 = number(&rect[3])?;
    Some(((x1 - x0).abs(), (y1 - y0).abs()))
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(n) => Some(*n as f32),
        Object::Real(x) => Some(*x),
        _ => None,
    }
}
