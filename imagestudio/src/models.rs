//! Model operations: multimodal content editing and image generation.

use std::sync::Arc;

use imagestudio_types::config::{GenerateContentConfig, GenerateContentRequest};
use imagestudio_types::content::Content;
use imagestudio_types::models::{GenerateImagesConfig, GenerateImagesResponse};
use imagestudio_types::response::GenerateContentResponse;
use serde_json::{Map, Number, Value};

use crate::client::ClientInner;
use crate::error::{Error, Result};

mod http;
mod parsers;

use http::build_model_method_url;
use parsers::parse_generate_images_response;

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Generate content with the default configuration.
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content_with_config(model, contents, GenerateContentConfig::default())
            .await
    }

    /// Generate content with a custom configuration. This is the call shape
    /// used for image editing: inline image parts plus text instructions,
    /// with image and text response modalities requested.
    pub async fn generate_content_with_config(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let request = GenerateContentRequest {
            contents,
            generation_config: config.generation_config,
        };

        let url = build_model_method_url(&self.inner, &model, "generateContent");
        let request = self.inner.http.post(url).json(&request);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            return Err(Error::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// Generate images from a text prompt via the `:predict` endpoint.
    pub async fn generate_images(
        &self,
        model: impl Into<String>,
        prompt: impl Into<String>,
        config: GenerateImagesConfig,
    ) -> Result<GenerateImagesResponse> {
        let model = model.into();
        let prompt = prompt.into();
        let body = build_generate_images_body(&prompt, &config);
        let url = build_model_method_url(&self.inner, &model, "predict");

        let request = self.inner.http.post(url).json(&body);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            return Err(Error::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let value = response.json::<Value>().await?;
        Ok(parse_generate_images_response(&value))
    }
}

fn build_generate_images_body(prompt: &str, config: &GenerateImagesConfig) -> Value {
    let mut instance = Map::new();
    instance.insert("prompt".to_string(), Value::String(prompt.to_string()));

    let mut root = Map::new();
    root.insert(
        "instances".to_string(),
        Value::Array(vec![Value::Object(instance)]),
    );

    let mut parameters = Map::new();
    let mut output_options = Map::new();

    if let Some(value) = &config.negative_prompt {
        parameters.insert("negativePrompt".to_string(), Value::String(value.clone()));
    }
    if let Some(value) = config.number_of_images {
        parameters.insert(
            "sampleCount".to_string(),
            Value::Number(Number::from(value)),
        );
    }
    if let Some(value) = &config.aspect_ratio {
        parameters.insert("aspectRatio".to_string(), Value::String(value.clone()));
    }
    if let Some(value) = &config.output_mime_type {
        output_options.insert("mimeType".to_string(), Value::String(value.clone()));
    }
    if !output_options.is_empty() {
        parameters.insert("outputOptions".to_string(), Value::Object(output_options));
    }

    if !parameters.is_empty() {
        root.insert("parameters".to_string(), Value::Object(parameters));
    }

    Value::Object(root)
}
