#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    CredentialOverrideRepository, InMemoryRepository, RESULT_CACHE_CAP, ResultCacheRepository,
    SettingsRepository, Storage, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
