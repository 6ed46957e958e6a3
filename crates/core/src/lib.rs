pub mod catalog;
pub mod dashboard;
pub mod domain;
pub mod fallback;
pub mod metrics;
pub mod repository;
pub mod session;
pub mod source;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Selects where the repository gets its data. Fixed for the lifetime of a
    /// [`crate::repository::PriceRepository`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DataMode {
        /// Serve the bundled dataset after a simulated latency; never touch the network.
        Mock,
        /// Call the remote API and fall back to the bundled dataset on failure.
        Remote,
    }

    impl DataMode {
        /// Interprets a `PRICE_API_USE_MOCK` style flag.
        pub fn from_mock_flag(value: &str) -> Option<Self> {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(Self::Mock),
                "0" | "false" | "no" | "off" => Some(Self::Remote),
                _ => None,
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub price_api_base_url: Option<String>,
        pub data_mode: DataMode,
        pub request_timeout: Duration,
        pub mock_latency: Option<Duration>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let data_mode = match lookup("PRICE_API_USE_MOCK") {
                Some(raw) => DataMode::from_mock_flag(&raw)
                    .with_context(|| format!("PRICE_API_USE_MOCK must be a boolean (got {raw:?})"))?,
                None => DataMode::Mock,
            };

            let request_timeout = match lookup("PRICE_API_TIMEOUT_SECS") {
                Some(raw) => {
                    let secs = raw
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid PRICE_API_TIMEOUT_SECS: {raw:?}"))?;
                    anyhow::ensure!(secs > 0, "PRICE_API_TIMEOUT_SECS must be at least 1");
                    Duration::from_secs(secs)
                }
                None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            };

            let mock_latency = match lookup("PRICE_API_MOCK_LATENCY_MS") {
                Some(raw) => Some(Duration::from_millis(
                    raw.trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid PRICE_API_MOCK_LATENCY_MS: {raw:?}"))?,
                )),
                None => None,
            };

            Ok(Self {
                price_api_base_url: lookup("PRICE_API_BASE_URL").filter(|s| !s.trim().is_empty()),
                data_mode,
                request_timeout,
                mock_latency,
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn base_url(&self) -> &str {
            self.price_api_base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
        }
    }

}
