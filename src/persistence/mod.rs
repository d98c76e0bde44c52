pub mod codec;
pub mod config;
pub mod files;
pub mod metadata;
pub mod sqlite;
pub mod store;

pub use config::{load_config, Config};
pub use files::{
    atomic_write, ensure_data_dir, init_local_data_dir, CONFIG_FILE_NAME, LOG_FILE_NAME,
    META_FILE_NAME,
};
pub use metadata::{load_metadata, save_metadata, SessionMetadata};
pub use sqlite::SqliteStore;
pub use store::{Store, StoreError};
