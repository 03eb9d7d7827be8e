//! pdfdoc
//!
//! A document-model adapter over the `lopdf` parsing engine. It opens a PDF
//! byte stream, handles the locked/unlocked lifecycle of encrypted files,
//! and exposes:
//! - page count and per-page access
//! - document metadata (Info dictionary, format version, page mode)
//! - the bookmark outline as an independently owned tree
//!
//! Malformed-but-openable files degrade to empty results rather than
//! errors, so a host can always query a document it managed to open.
//!
//! # Example
//!
//! ```no_run
//! use pdfdoc::Document;
//!
//! let mut doc = Document::new();
//! doc.open("manual.pdf").expect("Failed to open PDF");
//! if doc.is_locked() {
//!     doc.unlock("secret").expect("Wrong password");
//! }
//! println!("PDF {} with {} pages", doc.pdf_version(), doc.page_count());
//! for key in doc.info_keys() {
//!     println!("{key}: {}", doc.info_value(&key));
//! }
//! if let Some(outline) = doc.outline() {
//!     println!("{} top-level bookmarks", outline.children.len());
//! }
//! ```

pub mod doc;
pub mod error;
mod locale;

// Re-export commonly used items
pub use doc::{Document, Outline, Page, PageMode};
pub use error::{Error, Result};
