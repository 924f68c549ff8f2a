use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Shown in place of an answer whenever the remote endpoint misbehaves.
/// Questions that end here still count against the quota.
pub const FALLBACK_ANSWER: &str =
    "Sorry, I'm having trouble thinking right now. Give me a moment and ask again!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GatewayName {
    Gemini,
    Stub,
}

impl GatewayName {
    pub fn parse(text: String) -> Option<GatewayName> {
        return GatewayName::iter().find(|e| return e.to_string() == text);
    }
}

/// How a question resolved. The conversation renders both arms the same
/// way; the tag exists so logs and tests can tell a real answer from the
/// canned apology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Answer(String),
    Fallback { reason: String },
}

impl AnswerOutcome {
    pub fn text(&self) -> &str {
        match self {
            AnswerOutcome::Answer(text) => return text,
            AnswerOutcome::Fallback { .. } => return FALLBACK_ANSWER,
        }
    }

    pub fn is_fallback(&self) -> bool {
        return matches!(self, AnswerOutcome::Fallback { .. });
    }
}

#[async_trait]
pub trait AnswerGateway {
    fn name(&self) -> GatewayName;

    /// Confirms the remote endpoint is reachable before the chat starts.
    async fn health_check(&self) -> Result<()>;

    /// Resolves a single question to displayable text. Transport errors,
    /// bad statuses, and malformed response envelopes all collapse into
    /// `AnswerOutcome::Fallback` rather than surfacing as errors.
    async fn answer(&self, question: &str) -> AnswerOutcome;
}

pub type GatewayArc = Arc<dyn AnswerGateway + Send + Sync>;
