use imagestudio_types::models::{GenerateImagesResponse, GeneratedImage, Image};
use serde_json::Value;

pub(super) fn parse_generate_images_response(value: &Value) -> GenerateImagesResponse {
    let predictions = value
        .get("predictions")
        .and_then(|pred| pred.as_array())
        .cloned()
        .unwrap_or_default();

    let mut generated_images = Vec::new();
    for item in predictions {
        generated_images.push(parse_generated_image(&item));
    }

    GenerateImagesResponse { generated_images }
}

fn parse_generated_image(value: &Value) -> GeneratedImage {
    let image = serde_json::from_value::<Image>(value.clone()).ok();

    let rai_filtered_reason = value
        .get("raiFilteredReason")
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string);

    GeneratedImage {
        image,
        rai_filtered_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_generate_images_response() {
        let response = parse_generate_images_response(&json!({
            "predictions": [
                {"bytesBase64Encoded": "AQID", "mimeType": "image/png"},
                {"raiFilteredReason": "FILTERED"}
            ]
        }));
        assert_eq!(response.generated_images.len(), 2);
        let first = response.generated_images[0].image.as_ref().unwrap();
        assert_eq!(first.image_bytes.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(
            response.generated_images[1].rai_filtered_reason.as_deref(),
            Some("FILTERED")
        );
    }

    #[test]
    fn test_parse_empty_response() {
        let response = parse_generate_images_response(&json!({}));
        assert!(response.generated_images.is_empty());
    }
}
