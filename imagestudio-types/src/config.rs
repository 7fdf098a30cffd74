use serde::{Deserialize, Serialize};

use crate::content::Content;
use crate::enums::Modality;

/// Generation settings sent alongside the content of a `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i32>,
    /// Which modalities the model may return. Image editing requests both
    /// image and text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
}

/// Per-call configuration for `generate_content`.
#[derive(Debug, Clone, Default)]
pub struct GenerateContentConfig {
    pub generation_config: Option<GenerationConfig>,
}

/// Request body for `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}
