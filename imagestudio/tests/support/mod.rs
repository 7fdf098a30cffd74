use imagestudio::Client;

/// A client pointed at a local mock server.
pub fn build_studio_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .expect("client should build")
}
