//! Session identity module
//!
//! Per-profile session identifier and the local store it lives in.

pub mod provider;
pub mod storage;

pub use provider::{SessionId, SessionIdentityProvider, SESSION_ID_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
