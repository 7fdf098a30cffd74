use serde::{Deserialize, Serialize};

use crate::base64_serde;

/// Image generation configuration for the `:predict` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_images: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_mime_type: Option<String>,
}

/// An image returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "bytesBase64Encoded",
        with = "base64_serde::option"
    )]
    pub image_bytes: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// One generated image entry in a `:predict` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Set when the service withheld the image for responsible-AI reasons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rai_filtered_reason: Option<String>,
}

/// Image generation response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesResponse {
    #[serde(default)]
    pub generated_images: Vec<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_decodes_base64_bytes() {
        let image: Image = serde_json::from_value(json!({
            "bytesBase64Encoded": "AQID",
            "mimeType": "image/png"
        }))
        .unwrap();
        assert_eq!(image.image_bytes.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(image.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn config_omits_unset_fields() {
        let config = GenerateImagesConfig {
            number_of_images: Some(4),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({"numberOfImages": 4}));
    }
}
