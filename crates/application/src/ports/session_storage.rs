//! Session storage port

use async_trait::async_trait;
use thiserror::Error;

/// Storage key holding the raw session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized menu.
pub const MENU_KEY: &str = "menuList";

/// Errors raised by a session storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying persistence failed.
    #[error("storage I/O: {0}")]
    Io(String),

    /// A stored payload could not be decoded.
    #[error("corrupt storage payload: {0}")]
    Corrupt(String),
}

/// Port for key-value persistence scoped to one session.
///
/// Values survive page reloads within the same tab. The `routes installed`
/// flag is deliberately never stored here: a full reload recomputes it
/// false, forcing re-materialization.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value, `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or decoded.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Drops every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;
}
