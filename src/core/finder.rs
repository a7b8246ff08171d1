use crate::core::matcher::find_activities;
use crate::domain::catalog::Catalog;
use crate::domain::model::{Activity, FallbackReason, RankOutcome};
use crate::domain::ports::{RankContext, Recommender};
use crate::domain::query::{Query, DEFAULT_AGE, DEFAULT_MINUTES};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum AiStatus {
    /// AI was not requested, no recommender is configured, or nothing matched.
    Disabled,
    Ranked,
    /// The recommender had no credential and left the order alone.
    Unchanged,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub query: Query,
    pub activities: Vec<Activity>,
    pub ai: AiStatus,
}

pub struct FinderEngine<R: Recommender> {
    catalog: Catalog,
    recommender: Option<R>,
}

impl<R: Recommender> FinderEngine<R> {
    pub fn new(catalog: Catalog, recommender: R) -> Self {
        Self {
            catalog,
            recommender: Some(recommender),
        }
    }

    pub fn without_recommender(catalog: Catalog) -> Self {
        Self {
            catalog,
            recommender: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn search(&self, query: &Query, use_ai: bool) -> SearchReport {
        let matches = find_activities(&self.catalog, query);
        tracing::info!("🔎 Found {} matching games", matches.len());

        let recommender = match &self.recommender {
            Some(recommender) if use_ai && !matches.is_empty() => recommender,
            _ => {
                return SearchReport {
                    query: query.clone(),
                    activities: matches,
                    ai: AiStatus::Disabled,
                }
            }
        };

        // 精選模式下年齡/時間可能是無效值，改用預設值作為提示背景
        let context = RankContext {
            age: query.age.value().unwrap_or(DEFAULT_AGE),
            minutes: query.available_minutes.value().unwrap_or(DEFAULT_MINUTES),
        };

        tracing::info!("🤖 Asking AI to rank {} games", matches.len());
        let (activities, ai) = match recommender.rank(matches, context).await {
            RankOutcome::Ranked(list) => {
                tracing::info!("✅ Games have been sorted by AI recommendation");
                (list, AiStatus::Ranked)
            }
            RankOutcome::Unchanged(list) => (list, AiStatus::Unchanged),
            RankOutcome::Fallback(list, reason) => (list, AiStatus::Fallback(reason)),
        };

        SearchReport {
            query: query.clone(),
            activities,
            ai,
        }
    }
}
