//! Document lifecycle and facade.
//!
//! [`Document`] owns the engine handle and drives the state machine:
//! Unopened -> {Locked | Open} -> Unopened (close). The one-time load step
//! runs as soon as the document is readable (at open for plain files, after
//! authentication for encrypted ones) and caches page count and page mode.
//!
//! A `Document` is single-threaded by design; independent `Document`
//! instances are unrelated and may be driven from different threads.

use std::cell::OnceCell;
use std::path::Path;

use log::debug;
use lopdf::{Dictionary, Object, ObjectId};

use crate::doc::page::Page;
use crate::doc::resolve;
use crate::error::{Error, Result};
use crate::locale::NumericLocaleGuard;

/// Catalog hint for how a viewer should initially display the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    /// No side panel
    #[default]
    UseNone,
    /// Outline (bookmark) panel visible
    UseOutlines,
    /// Thumbnail panel visible
    UseThumbs,
    /// Full-screen presentation
    FullScreen,
    /// Optional-content group panel visible
    UseOc,
    /// Attachments panel visible
    UseAttachments,
}

impl PageMode {
    /// Parse a catalog PageMode name; unknown names are `None` so the
    /// caller keeps its default.
    fn from_name(name: &[u8]) -> Option<PageMode> {
        match name {
            b"UseNone" => Some(PageMode::UseNone),
            b"UseOutlines" => Some(PageMode::UseOutlines),
            b"UseThumbs" => Some(PageMode::UseThumbs),
            b"FullScreen" => Some(PageMode::FullScreen),
            b"UseOC" => Some(PageMode::UseOc),
            b"UseAttachments" => Some(PageMode::UseAttachments),
            _ => None,
        }
    }
}

/// Memoized location of the trailer's Info dictionary.
#[derive(Debug, Clone, Copy)]
enum InfoSlot {
    /// No Info entry, or it does not resolve to a dictionary
    Absent,
    /// Info is a direct dictionary inside the trailer
    InTrailer,
    /// Info is an indirect object
    At(ObjectId),
}

/// A PDF document: the single entry point hosts drive.
///
/// # Example
///
/// ```no_run
/// use pdfdoc::Document;
///
/// let mut doc = Document::new();
/// doc.open("manual.pdf").expect("not a readable PDF");
/// if doc.is_locked() {
///     doc.unlock("secret").expect("wrong password");
/// }
/// println!("{} pages", doc.page_count());
/// ```
#[derive(Default)]
pub struct Document {
    engine: Option<lopdf::Document>,
    page_count: usize,
    page_mode: PageMode,
    locked: bool,
    info: OnceCell<InfoSlot>,
}

impl Document {
    /// Create an unopened document.
    pub fn new() -> Document {
        Document::default()
    }

    /// Open a PDF from a file path.
    ///
    /// The path is handed to the OS as platform-native bytes, so non-ASCII
    /// file names need no re-encoding. Any previously open document is
    /// closed first.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        self.open_mem(&bytes)
    }

    /// Open a PDF from an in-memory byte buffer.
    ///
    /// On success the document is either readable right away or locked
    /// awaiting [`unlock`](Document::unlock). On failure the document stays
    /// closed.
    pub fn open_mem(&mut self, bytes: &[u8]) -> Result<()> {
        self.close();

        // Engines parse numeric literals under the process locale; force
        // LC_NUMERIC="C" for the duration of the open. The guard restores
        // the prior locale on the error path too.
        let mut engine = {
            let _locale = NumericLocaleGuard::new();
            lopdf::Document::load_mem(bytes)?
        };

        // Encryption with a blank user password needs nothing from the
        // host; authenticate it up front so such documents open readable.
        self.locked = engine.is_encrypted() && engine.decrypt("").is_err();
        self.engine = Some(engine);

        if self.locked {
            debug!("document opened, password required");
            return Ok(());
        }
        self.load()
    }

    /// Authenticate a locked document.
    ///
    /// [`Error::NotLocked`] when there is nothing to unlock;
    /// [`Error::WrongPassword`] when the engine rejects the password, in
    /// which case the document stays locked and the call may be retried.
    /// No attempt limit is enforced at this layer.
    pub fn unlock(&mut self, password: &str) -> Result<()> {
        if !self.locked {
            return Err(Error::NotLocked);
        }
        let Some(engine) = self.engine.as_mut() else {
            return Err(Error::NotLocked);
        };
        if let Err(err) = engine.decrypt(password) {
            debug!("authentication rejected: {err}");
            return Err(Error::WrongPassword);
        }
        self.locked = false;
        self.load()
    }

    /// Close the document and release the engine handle.
    ///
    /// Idempotent. Queries on a closed document return empty results.
    pub fn close(&mut self) {
        self.engine = None;
        self.page_count = 0;
        self.page_mode = PageMode::default();
        self.locked = false;
        self.info = OnceCell::new();
    }

    /// One-time load step once the document is readable: the trailer must
    /// locate the catalog; page count and page mode come from it.
    fn load(&mut self) -> Result<()> {
        let loaded = self.engine.as_ref().and_then(|engine| {
            let catalog = resolve::catalog(engine)?;
            let count = page_count_from_catalog(engine, catalog);
            let mode = page_mode_from_catalog(engine, catalog);
            Some((count, mode))
        });

        match loaded {
            Some((count, mode)) => {
                self.page_count = count;
                self.page_mode = mode;
                debug!("document loaded: {count} page(s), mode {mode:?}");
                Ok(())
            }
            None => {
                // The engine accepted the stream but there is no usable
                // catalog; drop the handle so the facade never reads as
                // half-open.
                self.close();
                Err(Error::MissingRoot)
            }
        }
    }

    /// True while the document requires a password that has not yet been
    /// accepted.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True when an engine handle is held (the document may still be
    /// locked).
    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Number of pages; 0 until the document is readable.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Viewer display hint parsed at load time. O(1).
    pub fn page_mode(&self) -> PageMode {
        self.page_mode
    }

    /// Borrow the page at `index` (zero-based).
    ///
    /// `None` when the document is closed or locked, or the index is out of
    /// range. The returned page cannot outlive this document.
    pub fn page(&self, index: usize) -> Option<Page<'_>> {
        if self.locked {
            return None;
        }
        let engine = self.engine.as_ref()?;
        Page::new(engine, index)
    }

    pub(crate) fn engine(&self) -> Option<&lopdf::Document> {
        self.engine.as_ref()
    }

    /// Resolve the trailer's Info dictionary, memoized for the lifetime of
    /// the open document and reset on close.
    pub(crate) fn info_dict(&self) -> Option<&Dictionary> {
        if self.locked {
            return None;
        }
        let engine = self.engine.as_ref()?;
        match self.info.get_or_init(|| locate_info(engine)) {
            InfoSlot::Absent => None,
            InfoSlot::InTrailer => engine.trailer.get(b"Info").ok().and_then(resolve::as_dict),
            InfoSlot::At(id) => engine.get_object(*id).ok().and_then(resolve::as_dict),
        }
    }
}

/// Locate the trailer's Info entry without holding a borrow of it.
fn locate_info(engine: &lopdf::Document) -> InfoSlot {
    match engine.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => match engine.get_object(*id) {
            Ok(Object::Dictionary(_)) => InfoSlot::At(*id),
            _ => InfoSlot::Absent,
        },
        Ok(Object::Dictionary(_)) => InfoSlot::InTrailer,
        _ => InfoSlot::Absent,
    }
}

/// Page count from the catalog's Pages/Count entry, falling back to
/// enumerating the page tree when the entry is absent or malformed.
fn page_count_from_catalog(engine: &lopdf::Document, catalog: &Dictionary) -> usize {
    let counted = resolve::dict_get(engine, catalog, b"Pages")
        .and_then(resolve::as_dict)
        .and_then(|pages| resolve::dict_get(engine, pages, b"Count"))
        .and_then(|count| count.as_i64().ok());

    match counted {
        Some(count) if count >= 0 => count as usize,
        _ => engine.get_pages().len(),
    }
}

fn page_mode_from_catalog(engine: &lopdf::Document, catalog: &Dictionary) -> PageMode {
    resolve::dict_get(engine, catalog, b"PageMode")
        .and_then(resolve::as_name)
        .and_then(PageMode::from_name)
        .unwrap_or_default()
}
