use crate::domain::model::{Activity, RankOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Single persistent credential slot.
pub trait KeyStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, value: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;

    fn has_key(&self) -> Result<bool> {
        Ok(self.get()?.is_some())
    }
}

/// Age/time context handed to a recommender along with the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankContext {
    pub age: i64,
    pub minutes: i64,
}

#[async_trait]
pub trait Recommender: Send + Sync {
    /// Reorders `activities`. Never fails: every outcome is a permutation of the input.
    async fn rank(&self, activities: Vec<Activity>, context: RankContext) -> RankOutcome;

    async fn recommend(&self, activities: Vec<Activity>, age: i64, minutes: i64) -> Vec<Activity> {
        self.rank(activities, RankContext { age, minutes })
            .await
            .into_activities()
    }
}
