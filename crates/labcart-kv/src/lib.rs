//! Type-safe key-value persistence for labcart.
//!
//! Cart state lives in a single durable slot, rewritten in full on every
//! mutation. This crate provides the storage seam:
//! a raw [`KeyValueStore`] trait with in-memory and file-backed
//! implementations, and a typed [`Kv`] wrapper that handles JSON
//! serialization automatically.

pub mod error;
pub mod store;

pub use error::KvError;
pub use store::{FileStore, KeyValueStore, Kv, MemoryStore};
