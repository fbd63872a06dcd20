use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    /// Google Maps API key. Optional at load time; its absence is
    /// surfaced as a configuration error on the first search request,
    /// so the server can still start and report health.
    pub google_maps_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Time-to-live for cached geocode and place-search responses.
    pub cache_ttl_secs: u64,
    /// Maximum number of places returned per search.
    pub result_cap: usize,
    /// Per-request timeout on outbound provider calls.
    pub request_timeout_secs: u64,
    /// Maximum concurrent place-details calls during enrichment.
    pub enrich_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("result_cap", &self.result_cap)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("enrich_concurrency", &self.enrich_concurrency)
            .finish()
    }
}
