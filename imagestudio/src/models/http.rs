use crate::client::ClientInner;

pub(super) fn transform_model_name(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

pub(super) fn build_model_method_url(inner: &ClientInner, model: &str, method: &str) -> String {
    let model = transform_model_name(model);
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}{version}/{model}:{method}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;

    #[test]
    fn test_transform_model_name() {
        assert_eq!(
            transform_model_name("gemini-2.5-flash-image"),
            "models/gemini-2.5-flash-image"
        );
        assert_eq!(transform_model_name("models/abc"), "models/abc");
    }

    #[test]
    fn test_build_model_method_url() {
        let client = Client::new("test-key").unwrap();
        let models = client.models();
        let url = build_model_method_url(&models.inner, "imagen-4.0-generate-001", "predict");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }
}
