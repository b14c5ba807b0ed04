pub mod backend;
pub mod config;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryBackend;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageBackend;

pub use backend::{SessionBackend, StorageError};
pub use config::PortalConfig;
pub use models::{Role, Session, User};
pub use session::{SessionKeys, SessionStore};
