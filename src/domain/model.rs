use crate::domain::video::VideoRef;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// 目錄中的一筆活動，啟動後不可變
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub min_age: i64,
    pub max_age: i64,
    pub time_required_minutes: i64,
    pub video: VideoRef,
    pub tags: BTreeSet<String>,
}

impl Activity {
    pub fn suits_age(&self, age: i64) -> bool {
        self.min_age <= age && age <= self.max_age
    }

    pub fn fits_in(&self, minutes: i64) -> bool {
        self.time_required_minutes <= minutes
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tags.contains(*tag))
    }
}

/// A number read from user input. `Malformed` never satisfies a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputNumber {
    Value(i64),
    Malformed,
}

impl InputNumber {
    pub fn value(self) -> Option<i64> {
        match self {
            InputNumber::Value(v) => Some(v),
            InputNumber::Malformed => None,
        }
    }

    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map(InputNumber::Value)
            .unwrap_or(InputNumber::Malformed)
    }
}

impl From<i64> for InputNumber {
    fn from(value: i64) -> Self {
        InputNumber::Value(value)
    }
}

impl fmt::Display for InputNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputNumber::Value(v) => write!(f, "{}", v),
            InputNumber::Malformed => f.write_str("?"),
        }
    }
}

impl Serialize for InputNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputNumber::Value(v) => serializer.serialize_i64(*v),
            InputNumber::Malformed => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    All,
    Indoor,
    Outdoor,
    Active,
    Quiet,
    Learning,
    Creative,
    Group,
    /// 沒有對應標籤的分類，不做過濾
    Unmapped(String),
}

impl Category {
    /// Empty input means "no category". Slugs are lowercase and matched
    /// exactly; anything else ("Creative") is kept as [`Category::Unmapped`].
    pub fn parse(raw: &str) -> Option<Self> {
        let slug = raw.trim();
        let category = match slug {
            "" => return None,
            "all" => Category::All,
            "indoor" => Category::Indoor,
            "outdoor" => Category::Outdoor,
            "active" => Category::Active,
            "quiet" => Category::Quiet,
            "learning" => Category::Learning,
            "creative" => Category::Creative,
            "group" => Category::Group,
            other => Category::Unmapped(other.to_string()),
        };
        Some(category)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => "all",
            Category::Indoor => "indoor",
            Category::Outdoor => "outdoor",
            Category::Active => "active",
            Category::Quiet => "quiet",
            Category::Learning => "learning",
            Category::Creative => "creative",
            Category::Group => "group",
            Category::Unmapped(name) => name.as_str(),
        }
    }

    /// Tags an activity needs (any of) to belong to this category.
    /// `None` means the category does not restrict the result.
    pub fn tags(&self) -> Option<&'static [&'static str]> {
        let tags: &'static [&'static str] = match self {
            Category::Indoor => &["indoor"],
            Category::Outdoor => &["outdoor"],
            Category::Active => &["active"],
            Category::Quiet => &["quiet"],
            Category::Learning => &["learning"],
            Category::Creative => &["creative", "art"],
            Category::Group => &["group", "party"],
            Category::All | Category::Unmapped(_) => return None,
        };
        Some(tags)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Why a ranking attempt degraded to the input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    Transport(String),
    Status(u16),
    ResponseShape(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Transport(detail) => write!(f, "transport failure: {}", detail),
            FallbackReason::Status(code) => write!(f, "endpoint returned HTTP {}", code),
            FallbackReason::ResponseShape(detail) => write!(f, "unusable response: {}", detail),
        }
    }
}

/// 排序結果。三種情況都保證是輸入的重新排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankOutcome {
    Ranked(Vec<Activity>),
    /// No credential or nothing to rank; no request was made.
    Unchanged(Vec<Activity>),
    Fallback(Vec<Activity>, FallbackReason),
}

impl RankOutcome {
    pub fn activities(&self) -> &[Activity] {
        match self {
            RankOutcome::Ranked(list)
            | RankOutcome::Unchanged(list)
            | RankOutcome::Fallback(list, _) => list,
        }
    }

    pub fn into_activities(self) -> Vec<Activity> {
        match self {
            RankOutcome::Ranked(list)
            | RankOutcome::Unchanged(list)
            | RankOutcome::Fallback(list, _) => list,
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, RankOutcome::Ranked(_))
    }
}
