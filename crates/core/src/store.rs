//! Storage seam for the single save slot.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save slot unavailable: {0}")]
    Unavailable(String),
    #[error("save slot I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// One save slot. Implementations hold exactly zero or one document.
pub trait SaveStore {
    /// Returns `Ok(None)` when the slot is empty.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, contents: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-process slot used by tests and tools.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { contents: Some(contents.into()) }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), StoreError> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.contents = None;
        Ok(())
    }
}
