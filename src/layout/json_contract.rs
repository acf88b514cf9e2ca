use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

use super::LayoutRects;

pub const LAYOUT_RECTS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRectsJsonContractV1 {
    pub schema_version: u32,
    pub rects: LayoutRects,
}

impl LayoutRects {
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize layout rects json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = LayoutRectsJsonContractV1 {
            schema_version: LAYOUT_RECTS_JSON_SCHEMA_V1,
            rects: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize layout rects contract v1: {e}"))
        })
    }

    /// Parses either a bare `LayoutRects` document or a versioned contract.
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        if let Ok(rects) = serde_json::from_str::<LayoutRects>(input) {
            return Ok(rects);
        }
        let payload: LayoutRectsJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotError::InvalidData(format!("failed to parse layout rects json payload: {e}"))
        })?;
        if payload.schema_version != LAYOUT_RECTS_JSON_SCHEMA_V1 {
            return Err(PlotError::InvalidData(format!(
                "unsupported layout rects schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.rects)
    }
}
