#[cfg(feature = "cli")]
pub mod cli;
pub mod key_store;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, FindArgs, KeyAction};
pub use key_store::{FileKeyStore, MemoryKeyStore};
pub use toml_config::{AppConfig, GenerationConfig, RecommenderConfig, SearchConfig};
