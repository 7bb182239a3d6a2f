use std::env;

/// Endpoints and credentials for the remote AI-assist vendors.
///
/// Translation and image processing are opaque third-party services; the
/// API only proxies to them. Unset endpoints leave the corresponding assist
/// route returning 503.
#[derive(Clone, Debug)]
pub struct AssistConfig {
    pub translate_endpoint: Option<String>,
    pub image_endpoint: Option<String>,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl AssistConfig {
    pub fn from_env() -> Self {
        Self {
            translate_endpoint: env::var("ASSIST_TRANSLATE_ENDPOINT")
                .ok()
                .filter(|s| !s.is_empty()),
            image_endpoint: env::var("ASSIST_IMAGE_ENDPOINT")
                .ok()
                .filter(|s| !s.is_empty()),
            api_key: env::var("ASSIST_API_KEY").unwrap_or_default(),
            timeout_secs: env::var("ASSIST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}
