//! Storage implementations.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "json-file")]
pub mod file;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;

#[cfg(feature = "json-file")]
pub use file::JsonFileStore;
