pub mod chatbot;
pub mod finder;
pub mod matcher;
pub mod recommender;

pub use crate::domain::model::{Activity, FallbackReason, RankOutcome};
pub use crate::domain::ports::{KeyStore, RankContext, Recommender};
pub use crate::utils::error::Result;
