//! Dispatch: turn a validated [`GenerationRequest`] into one remote call and
//! fold the response into gallery entries.

use imagestudio_types::config::{GenerateContentConfig, GenerationConfig};
use imagestudio_types::content::{Content, Part, Role};
use imagestudio_types::enums::Modality;
use imagestudio_types::models::GenerateImagesConfig;

use crate::client::Client;
use crate::studio::gallery::GalleryImage;
use crate::studio::request::{
    GenerationRequest, FACE_SWAP_INSTRUCTION, IMAGE_COUNT, UPSCALE_INSTRUCTION,
};
use crate::studio::StudioError;

/// Which models the studio calls for each family of operations.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Multimodal model used for edit, upscale and face swap.
    pub edit_model: String,
    /// Text-to-image model called via `:predict`.
    pub image_model: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            edit_model: "gemini-2.5-flash-image".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
        }
    }
}

impl StudioConfig {
    /// Build the configuration from the environment, falling back to the
    /// defaults. Honors `GENAI_EDIT_MODEL` and `GENAI_IMAGE_MODEL`; blank
    /// values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(model) = env_model("GENAI_EDIT_MODEL") {
            config.edit_model = model;
        }
        if let Some(model) = env_model("GENAI_IMAGE_MODEL") {
            config.image_model = model;
        }
        config
    }
}

fn env_model(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Run one generation cycle: exactly one remote call, then collect the
/// returned images in response order. Text-to-image goes through `:predict`,
/// everything else through `generateContent` with inline image parts.
///
/// # Errors
/// `Remote` when the call or response decoding fails.
pub async fn run_cycle(
    client: &Client,
    config: &StudioConfig,
    request: GenerationRequest,
) -> Result<Vec<GalleryImage>, StudioError> {
    match request {
        GenerationRequest::TextToImage {
            prompt,
            negative_prompt,
            aspect_ratio,
        } => {
            tracing::debug!(model = %config.image_model, "dispatching text-to-image request");
            let images_config = GenerateImagesConfig {
                negative_prompt: (!negative_prompt.is_empty()).then_some(negative_prompt),
                number_of_images: Some(IMAGE_COUNT),
                aspect_ratio: Some(aspect_ratio.as_str().to_string()),
                output_mime_type: Some("image/png".to_string()),
            };
            let response = client
                .models()
                .generate_images(&config.image_model, prompt, images_config)
                .await
                .map_err(StudioError::Remote)?;

            let mut gallery = Vec::new();
            for generated in response.generated_images {
                if let Some(reason) = &generated.rai_filtered_reason {
                    tracing::warn!(reason = %reason, "image filtered by the service");
                }
                let Some(image) = generated.image else {
                    continue;
                };
                let Some(bytes) = image.image_bytes else {
                    continue;
                };
                gallery.push(GalleryImage {
                    bytes,
                    mime_type: image
                        .mime_type
                        .unwrap_or_else(|| "image/png".to_string()),
                });
            }
            tracing::debug!(count = gallery.len(), "text-to-image cycle finished");
            Ok(gallery)
        }
        other => {
            let parts = edit_parts(other);
            tracing::debug!(model = %config.edit_model, "dispatching multimodal edit request");
            let content = Content::from_parts(parts, Role::User);
            let content_config = GenerateContentConfig {
                generation_config: Some(GenerationConfig {
                    response_modalities: Some(vec![Modality::Image, Modality::Text]),
                    ..Default::default()
                }),
            };
            let response = client
                .models()
                .generate_content_with_config(&config.edit_model, vec![content], content_config)
                .await
                .map_err(StudioError::Remote)?;

            let gallery: Vec<GalleryImage> = response
                .inline_images()
                .into_iter()
                .map(|blob| GalleryImage {
                    bytes: blob.data.clone(),
                    mime_type: blob.mime_type.clone(),
                })
                .collect();
            tracing::debug!(count = gallery.len(), "edit cycle finished");
            Ok(gallery)
        }
    }
}

/// The ordered parts for the multimodal modes: images first, instruction last.
fn edit_parts(request: GenerationRequest) -> Vec<Part> {
    match request {
        GenerationRequest::ImageEdit { image, prompt } => vec![
            Part::inline_data(image.data, image.mime_type),
            Part::text(prompt),
        ],
        GenerationRequest::ImageUpscale { image } => vec![
            Part::inline_data(image.data, image.mime_type),
            Part::text(UPSCALE_INSTRUCTION),
        ],
        GenerationRequest::FaceSwap { source, target } => vec![
            Part::inline_data(source.data, source.mime_type),
            Part::inline_data(target.data, target.mime_type),
            Part::text(FACE_SWAP_INSTRUCTION),
        ],
        GenerationRequest::TextToImage { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::state::UploadedImage;
    use crate::test_support::with_env;

    fn sample(data: Vec<u8>) -> UploadedImage {
        UploadedImage {
            data,
            mime_type: "image/png".into(),
        }
    }

    #[test]
    fn config_from_env_overrides_models() {
        with_env(
            &[
                ("GENAI_EDIT_MODEL", Some("custom-edit")),
                ("GENAI_IMAGE_MODEL", Some("custom-image")),
            ],
            || {
                let config = StudioConfig::from_env();
                assert_eq!(config.edit_model, "custom-edit");
                assert_eq!(config.image_model, "custom-image");
            },
        );
    }

    #[test]
    fn config_from_env_ignores_blank_values() {
        with_env(
            &[
                ("GENAI_EDIT_MODEL", Some("   ")),
                ("GENAI_IMAGE_MODEL", None),
            ],
            || {
                let config = StudioConfig::from_env();
                assert_eq!(config.edit_model, "gemini-2.5-flash-image");
                assert_eq!(config.image_model, "imagen-4.0-generate-001");
            },
        );
    }

    #[test]
    fn edit_parts_order_image_then_prompt() {
        let parts = edit_parts(GenerationRequest::ImageEdit {
            image: sample(vec![1]),
            prompt: "make the sky purple".into(),
        });
        assert_eq!(parts.len(), 2);
        assert!(parts[0].inline_data_ref().is_some());
        assert_eq!(parts[1].text_value(), Some("make the sky purple"));
    }

    #[test]
    fn upscale_uses_fixed_instruction() {
        let parts = edit_parts(GenerationRequest::ImageUpscale {
            image: sample(vec![1]),
        });
        assert_eq!(parts[1].text_value(), Some(UPSCALE_INSTRUCTION));
    }

    #[test]
    fn face_swap_orders_source_target_instruction() {
        let parts = edit_parts(GenerationRequest::FaceSwap {
            source: sample(vec![1]),
            target: sample(vec![2]),
        });
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].inline_data_ref().map(|b| &b.data), Some(&vec![1]));
        assert_eq!(parts[1].inline_data_ref().map(|b| &b.data), Some(&vec![2]));
        assert_eq!(parts[2].text_value(), Some(FACE_SWAP_INSTRUCTION));
    }
}
