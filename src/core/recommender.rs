use crate::config::toml_config::RecommenderConfig;
use crate::domain::model::{Activity, FallbackReason, RankOutcome};
use crate::domain::ports::{RankContext, Recommender};
use rand::Rng;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::LazyLock;
use std::time::Duration;

const SCENARIOS: [&str; 10] = [
    "We're at home and need a quiet activity.",
    "We're feeling energetic today and need something active.",
    "We want a game that helps with learning.",
    "We're looking for something creative.",
    "It's a rainy day and we need an indoor activity.",
    "We want a game that involves the whole family.",
    "We're tired and need something calm and relaxing.",
    "We want to practice problem-solving skills.",
    "We need a game that requires minimal setup.",
    "We want a game that helps with physical coordination.",
];

static TITLE_ARRAY: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*?\]"));

/// Random scenario plus seed mixed into the prompt so identical searches
/// don't always come back in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptHint {
    pub seed: u32,
    pub scenario: &'static str,
}

impl PromptHint {
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            seed: rng.gen_range(0..1000),
            scenario: SCENARIOS[rng.gen_range(0..SCENARIOS.len())],
        }
    }
}

pub fn build_prompt(
    activities: &[Activity],
    context: RankContext,
    hint: Option<PromptHint>,
) -> String {
    let titles = activities
        .iter()
        .map(|a| a.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "I have a {} year old child and {} minutes to play.\n",
        context.age, context.minutes
    );
    if let Some(hint) = hint {
        prompt.push_str(hint.scenario);
        prompt.push('\n');
    }
    prompt.push_str(&format!("I have these game options: {}.\n\n", titles));
    prompt.push_str(
        "Please rank these games from best to worst for my specific situation.\n\
         Consider different factors like educational value, fun factor, and engagement level.\n",
    );
    if let Some(hint) = hint {
        prompt.push_str(&format!(
            "Use random seed {} to ensure diversity in your recommendations.\n",
            hint.seed
        ));
    }
    prompt.push_str(
        "\nReturn ONLY a JSON array with game titles in order from best to worst.\n\
         Format: [\"Game1\", \"Game2\", \"Game3\"]",
    );
    prompt
}

/// 從模型回覆中找出第一個 `[...]` 並解析成標題陣列
pub fn parse_ranked_titles(text: &str) -> Result<Vec<String>, FallbackReason> {
    let re = TITLE_ARRAY
        .as_ref()
        .map_err(|e| FallbackReason::ResponseShape(format!("bad title pattern: {}", e)))?;

    let array = re
        .find(text)
        .ok_or_else(|| FallbackReason::ResponseShape("no JSON array found in response".into()))?;

    serde_json::from_str::<Vec<String>>(array.as_str()).map_err(|e| {
        FallbackReason::ResponseShape(format!("ranked titles are not a string array: {}", e))
    })
}

/// Orders activities by `titles`, then appends whatever the titles missed in
/// original order. Each input activity is emitted exactly once, even when
/// titles repeat on either side.
pub fn reorder_by_titles(activities: Vec<Activity>, titles: &[String]) -> Vec<Activity> {
    let mut positions: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (index, activity) in activities.iter().enumerate() {
        positions
            .entry(activity.title.clone())
            .or_default()
            .push_back(index);
    }

    let mut slots: Vec<Option<Activity>> = activities.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for title in titles {
        match positions.get_mut(title).and_then(VecDeque::pop_front) {
            Some(index) => {
                if let Some(activity) = slots[index].take() {
                    ordered.push(activity);
                }
            }
            None => tracing::debug!("Ranked title '{}' matches no remaining candidate", title),
        }
    }

    // 模型沒提到的活動維持原本順序接在後面
    ordered.extend(slots.into_iter().flatten());
    ordered
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Ranking client for the Gemini `generateContent` endpoint.
///
/// The credential is injected at construction; an absent or blank key turns
/// every call into a no-op.
pub struct GeminiRecommender {
    config: RecommenderConfig,
    api_key: Option<String>,
    client: Client,
}

impl GeminiRecommender {
    pub fn new(config: RecommenderConfig, api_key: Option<String>) -> Self {
        Self {
            config,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client: Client::new(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: String) -> GenerateRequest {
        let generation = &self.config.generation;
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: WireGenerationConfig {
                temperature: generation.temperature,
                max_output_tokens: generation.max_output_tokens,
                top_k: generation.top_k,
                top_p: generation.top_p,
            },
        }
    }

    async fn request_ranking(
        &self,
        activities: &[Activity],
        context: RankContext,
        api_key: &str,
    ) -> Result<Vec<String>, FallbackReason> {
        let hint = self.config.diversify.then(PromptHint::random);
        let prompt = build_prompt(activities, context, hint);
        let url = self.generate_url();

        // 金鑰放在查詢參數，不寫進日誌
        tracing::debug!("Making ranking request to: {}", url);
        let mut request = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&self.request_body(prompt));

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(Duration::from_secs(timeout));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FallbackReason::Transport(e.without_url().to_string()))?;

        let status = response.status();
        tracing::debug!("Ranking response status: {}", status);
        if !status.is_success() {
            return Err(FallbackReason::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FallbackReason::Transport(e.without_url().to_string()))?;

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| FallbackReason::ResponseShape(format!("invalid JSON body: {}", e)))?;

        let text = parsed.first_text().ok_or_else(|| {
            FallbackReason::ResponseShape("response has no candidate text".to_string())
        })?;

        parse_ranked_titles(text)
    }
}

#[async_trait::async_trait]
impl Recommender for GeminiRecommender {
    async fn rank(&self, activities: Vec<Activity>, context: RankContext) -> RankOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("No API key configured, keeping original order");
            return RankOutcome::Unchanged(activities);
        };

        if activities.is_empty() {
            return RankOutcome::Unchanged(activities);
        }

        match self.request_ranking(&activities, context, api_key).await {
            Ok(titles) => {
                tracing::debug!("Model ranked {} titles", titles.len());
                RankOutcome::Ranked(reorder_by_titles(activities, &titles))
            }
            Err(reason) => {
                tracing::warn!("⚠️ AI ranking unavailable ({}), keeping original order", reason);
                RankOutcome::Fallback(activities, reason)
            }
        }
    }
}
