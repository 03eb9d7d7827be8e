//! PDF document model: lifecycle, metadata, outline and page access.

pub mod document;
mod metadata;
pub mod outline;
pub mod page;
pub(crate) mod resolve;

// Re-export commonly used items
pub use document::{Document, PageMode};
pub use outline::Outline;
pub use page::Page;
