#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnswerGateway;
use crate::domain::models::AnswerOutcome;
use crate::domain::models::GatewayName;

/// Every question ships inside the same mentor instructions so answers stay
/// on topic and beginner friendly.
const PROMPT_TEMPLATE: &str = "You are Innobot, a friendly robotics mentor for Innobotix learning kits. Answer beginner questions about Arduino, circuits, sensors, and robot building in simple, encouraging language. Keep answers short and practical.";

const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

pub struct Gemini {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl Gemini {
    async fn request_answer(&self, question: &str) -> Result<String> {
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{PROMPT_TEMPLATE}\n\nQuestion: {question}"),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                model = Config::get(ConfigKey::Model),
                key = self.token,
            ))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(format!(
                "Gemini answered with status {status}",
                status = res.status().as_u16()
            ));
        }

        let envelope = res.json::<GenerateResponse>().await?;
        let text = envelope
            .candidates
            .first()
            .and_then(|candidate| return candidate.content.parts.first())
            .map(|part| return part.text.trim().to_string())
            .ok_or_else(|| return anyhow!("Gemini answered without candidate text"))?;

        if text.is_empty() {
            bail!("Gemini answered with empty candidate text");
        }

        return Ok(text);
    }
}

#[async_trait]
impl AnswerGateway for Gemini {
    fn name(&self) -> GatewayName {
        return GatewayName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/models/{model}?key={key}",
            url = self.url,
            model = Config::get(ConfigKey::Model),
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    /// Failures collapse into the canned apology. The question has already
    /// counted against the quota by the time this runs.
    #[allow(clippy::implicit_return)]
    async fn answer(&self, question: &str) -> AnswerOutcome {
        match self.request_answer(question).await {
            Ok(text) => return AnswerOutcome::Answer(text),
            Err(err) => {
                tracing::error!(error = ?err, "Gemini failed to answer, falling back");
                return AnswerOutcome::Fallback {
                    reason: err.to_string(),
                };
            }
        }
    }
}
