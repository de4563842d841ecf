pub const DEFAULT_GOOGLE_BASE_URL: &str = "http://maps.google.com/maps/geo";
pub const DEFAULT_USER_AGENT: &str = "graticule/0.1 (geocoding)";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl GeocoderConfig {
    /// Config with the given key and every other setting at its default.
    #[must_use]
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            base_url: DEFAULT_GOOGLE_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl std::fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
