//! Configuration schema types for nyai.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod provider;
mod session;

pub use logging::*;
pub use provider::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for nyai.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NyaiConfig {
    pub session: SessionConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
}
