//! Serialization of finished decks into retrievable in-memory resources.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, error};

use crate::backend::{BackendError, DocumentSink};

/// Scheme prefix of every handle issued by a [`ResourceStore`].
pub const HANDLE_PREFIX: &str = "blob:flashdeck/";

/// Opaque reference to a registered resource.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A typed binary payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    media_type: String,
    bytes: Vec<u8>,
}

impl Resource {
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Owner of exported resources, addressed by [`ResourceHandle`].
///
/// Handles are unique for the lifetime of a store, including after revocation.
#[derive(Debug, Default)]
pub struct ResourceStore {
    next_id: u64,
    resources: BTreeMap<ResourceHandle, Resource>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `bytes` and returns a fresh handle for them.
    pub fn register(&mut self, media_type: impl Into<String>, bytes: Vec<u8>) -> ResourceHandle {
        self.next_id += 1;
        let handle = ResourceHandle(format!("{HANDLE_PREFIX}{}", self.next_id));
        self.resources.insert(
            handle.clone(),
            Resource {
                media_type: media_type.into(),
                bytes,
            },
        );
        handle
    }

    /// Looks up a resource by handle.  Accepts any string form of a handle.
    pub fn resolve(&self, handle: &str) -> Option<&Resource> {
        self.resources.get(&ResourceHandle(handle.to_owned()))
    }

    /// Removes a resource, returning it if it was still registered.
    pub fn revoke(&mut self, handle: &str) -> Option<Resource> {
        self.resources.remove(&ResourceHandle(handle.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Errors that prevent a deck from being exported.
#[derive(Debug)]
pub enum ExportError {
    /// The document could not be assembled (font embedding or page submission).
    Assemble(BackendError),
    /// The assembled document could not be serialized.
    Serialize(BackendError),
    /// Post-processing of the serialized bytes failed.
    #[cfg(feature = "bookmarks")]
    Bookmarks(crate::bookmarks::BookmarkError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assemble(_) => write!(f, "Failed to assemble flashcard deck"),
            Self::Serialize(_) => write!(f, "Failed to serialize flashcard deck"),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(_) => write!(f, "Failed to add deck bookmarks"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Assemble(err) | Self::Serialize(err) => Some(err),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(err) => Some(err),
        }
    }
}

/// Serializes `document` and registers the bytes in `store`.
///
/// Serialization failures are logged and returned; the store is left untouched.
pub fn export<D: DocumentSink>(
    document: D,
    media_type: &str,
    store: &mut ResourceStore,
) -> Result<ResourceHandle, ExportError> {
    let bytes = serialize(document)?;
    Ok(register(bytes, media_type, store))
}

pub(crate) fn serialize<D: DocumentSink>(document: D) -> Result<Vec<u8>, ExportError> {
    let pages = document.page_count();
    document.save().map_err(|err| {
        error!("Failed to serialize {pages} page document: {err}");
        ExportError::Serialize(err)
    })
}

pub(crate) fn register(
    bytes: Vec<u8>,
    media_type: &str,
    store: &mut ResourceStore,
) -> ResourceHandle {
    let size = bytes.len();
    let handle = store.register(media_type, bytes);
    debug!("Registered {size} byte {media_type} resource as {handle}");
    handle
}
