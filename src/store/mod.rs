pub mod json_store;
pub mod schema;

use std::cell::RefCell;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("progress storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable key-value slot holding the serialized progress blob.
pub trait ProgressBackend {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, blob: &str) -> Result<(), StoreError>;
}

/// Process-lifetime backend: used in tests and when no data directory is usable.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: RefCell<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: RefCell::new(Some(blob.to_string())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl ProgressBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.borrow().clone())
    }

    fn save(&self, blob: &str) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}

impl<B: ProgressBackend + ?Sized> ProgressBackend for std::rc::Rc<B> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> Result<(), StoreError> {
        (**self).save(blob)
    }
}
