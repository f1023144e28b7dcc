//! Configuration for the IcePanel specific provisioner.
//!
//! Responsibilities:
//! - Load service configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for explicit overrides in tests.
//!
//! Does NOT handle:
//! - Construction of the IcePanel HTTP client (see `icepanel-client`).
//! - Persisting configuration back to disk.
//!
//! Invariants:
//! - Environment variables take precedence over builder defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading,
//!   and the `DOTENV_DISABLED` gate is honored so tests never pick up a
//!   developer's local `.env`.

mod loader;
mod types;

pub use loader::{
    ConfigError, ConfigLoader, DEFAULT_BASE_URL, DEFAULT_BIND_ADDR, DEFAULT_TIMEOUT_SECS,
};
pub use types::Config;
