//! Client-side state for the FrameSpell dashboard: domain models, the plan
//! table, configuration, and everything persisted in the browser.

pub mod config;
pub mod error;
pub mod models;
pub mod plans;
pub mod session;
pub mod settings;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::ClientConfig;
pub use error::StoreError;
pub use models::{Language, SubscriptionType, UserRecord};
pub use plans::{format_euro, MonthSummary, PlanLimits, RateLimit, UsageSummary};
pub use session::{Session, SessionStore};
pub use settings::{SettingsStore, UserSettings};
pub use storage::KeyValueStore;

/// The storage backend used by the running application.
///
/// - **Web** (WASM + `web` feature): the browser's `localStorage`
/// - **Everything else**: an in-memory map (tests, native tooling)
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type BrowserStorage = LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type BrowserStorage = MemoryStorage;
