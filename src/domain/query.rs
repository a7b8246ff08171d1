use crate::domain::model::{Category, InputNumber};
use serde::Serialize;

pub const DEFAULT_AGE: i64 = 4;
pub const DEFAULT_MINUTES: i64 = 15;

/// 使用者的搜尋條件，建立後不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub age: InputNumber,
    pub available_minutes: InputNumber,
    pub category: Option<Category>,
    pub featured_id: Option<String>,
}

impl Query {
    pub fn new(age: i64, available_minutes: i64) -> Self {
        Self {
            age: InputNumber::Value(age),
            available_minutes: InputNumber::Value(available_minutes),
            category: None,
            featured_id: None,
        }
    }

    /// Featured mode: every other field is ignored by the matcher.
    pub fn featured(id: impl Into<String>) -> Self {
        Self {
            featured_id: Some(id.into()),
            ..Self::new(DEFAULT_AGE, DEFAULT_MINUTES)
        }
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_featured_id(mut self, featured_id: Option<String>) -> Self {
        self.featured_id = featured_id.filter(|id| !id.trim().is_empty());
        self
    }

    /// Parses `age=6&time=15&category=creative&featured=5`.
    ///
    /// Missing numbers take the given defaults, unparsable ones become
    /// [`InputNumber::Malformed`]. Empty `category`/`featured` count as absent
    /// and unknown keys are ignored.
    pub fn from_query_string_with_defaults(
        raw: &str,
        default_age: i64,
        default_minutes: i64,
    ) -> Self {
        let raw = raw.trim_start_matches('?');
        let mut query = Self::new(default_age, default_minutes);

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "age" => query.age = number_or_default(&value, default_age),
                "time" => query.available_minutes = number_or_default(&value, default_minutes),
                "category" => query.category = Category::parse(&value),
                "featured" => {
                    let id = value.trim();
                    query.featured_id = (!id.is_empty()).then(|| id.to_string());
                }
                other => tracing::debug!("Ignoring unknown query parameter: {}", other),
            }
        }

        query
    }

    pub fn from_query_string(raw: &str) -> Self {
        Self::from_query_string_with_defaults(raw, DEFAULT_AGE, DEFAULT_MINUTES)
    }
}

// 空字串視同沒給，沿用預設值
fn number_or_default(raw: &str, default: i64) -> InputNumber {
    if raw.is_empty() {
        InputNumber::Value(default)
    } else {
        InputNumber::parse(raw)
    }
}
