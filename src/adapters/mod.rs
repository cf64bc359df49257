// Adapters layer: concrete implementations for external systems (file system storage).

pub mod storage;

pub use storage::LocalStorage;
