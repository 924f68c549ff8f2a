#[cfg(test)]
#[path = "stub_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::AnswerGateway;
use crate::domain::models::AnswerOutcome;
use crate::domain::models::GatewayName;

pub const STUB_ANSWER: &str = "Here's a tip while I'm offline: double-check that every jumper wire is seated firmly in the breadboard before you power the board on. Loose wires cause most first-build gremlins!";

/// Answers every question with the same canned tip. Keeps the full chat flow
/// usable offline, in demos, and in tests.
#[derive(Default)]
pub struct Stub {}

#[async_trait]
impl AnswerGateway for Stub {
    fn name(&self) -> GatewayName {
        return GatewayName::Stub;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn answer(&self, _question: &str) -> AnswerOutcome {
        return AnswerOutcome::Answer(STUB_ANSWER.to_string());
    }
}
