pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{AppConfig, FileKeyStore, MemoryKeyStore};
pub use core::{
    finder::{AiStatus, FinderEngine, SearchReport},
    matcher::find_activities,
    recommender::GeminiRecommender,
};
pub use domain::{
    catalog::Catalog,
    model::{Activity, Category, FallbackReason, RankOutcome},
    ports::{KeyStore, Recommender},
    query::Query,
};
pub use utils::error::{PlayError, Result};
