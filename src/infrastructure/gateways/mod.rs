pub mod gemini;
pub mod stub;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::GatewayArc;
use crate::domain::models::GatewayName;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get(name: GatewayName) -> Result<GatewayArc> {
        if name == GatewayName::Gemini {
            return Ok(Arc::<gemini::Gemini>::default());
        }

        if name == GatewayName::Stub {
            return Ok(Arc::<stub::Stub>::default());
        }

        bail!(format!("No gateway implemented for {name}"))
    }
}
