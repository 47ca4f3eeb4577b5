// Port for the string-keyed store that holds persisted workouts

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage document is unreadable: {0}")]
    Document(#[source] serde_json::Error),

    #[error("failed to encode workouts: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("stored workouts are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or None if the key was never set
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
