//! Fleet size lookup: a built-in table, optionally refreshed from a live ranking page.

use crate::domain::model::FleetTables;
use crate::domain::ports::FleetSource;
use crate::utils::error::FleetFetchError;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_RANKING_ENDPOINT: &str = "https://www.globalfirepower.com/aircraft-total.php";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_MAX_ENTRIES: usize = 10;
pub const MISSING_TOTAL_FLEET: u32 = 100;
pub const MISSING_COMBAT_FLEET: u32 = 50;

const TOTAL_FLEET: [(&str, u32); 17] = [
    ("USA", 13209),
    ("RUS", 4255),
    ("CHN", 3304),
    ("IND", 2296),
    ("KOR", 1576),
    ("JPN", 1459),
    ("PAK", 1434),
    ("EGY", 1080),
    ("TUR", 1069),
    ("FRA", 972),
    ("PRK", 951),
    ("SAU", 914),
    ("ITA", 800),
    ("TWN", 750),
    ("GBR", 664),
    ("DEU", 618),
    ("ESP", 513),
];

const COMBAT_FLEET: [(&str, u32); 13] = [
    ("USA", 2803),
    ("RUS", 1538),
    ("CHN", 1334),
    ("IND", 686),
    ("PRK", 572),
    ("KOR", 467),
    ("PAK", 450),
    ("EGY", 427),
    ("FRA", 265),
    ("JPN", 261),
    ("GBR", 183),
    ("ITA", 210),
    ("DEU", 98),
];

/// Fallback fleet tables used whenever the live source cannot be used.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetDefaults {
    pub total: HashMap<String, u32>,
    pub combat: HashMap<String, u32>,
    pub missing_total: u32,
    pub missing_combat: u32,
}

impl Default for FleetDefaults {
    fn default() -> Self {
        Self {
            total: to_map(&TOTAL_FLEET),
            combat: to_map(&COMBAT_FLEET),
            missing_total: MISSING_TOTAL_FLEET,
            missing_combat: MISSING_COMBAT_FLEET,
        }
    }
}

fn to_map(entries: &[(&str, u32)]) -> HashMap<String, u32> {
    entries
        .iter()
        .map(|(code, count)| (code.to_string(), *count))
        .collect()
}

fn ranking_row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\w+)</td>\s*<td>(\d+)").expect("ranking row pattern is valid")
    })
}

/// Extract up to `max_entries` leading `(code, count)` rows from a ranking page.
///
/// Either every extracted row parses or the whole page is rejected.
pub fn parse_rankings(
    body: &str,
    max_entries: usize,
) -> std::result::Result<HashMap<String, u32>, FleetFetchError> {
    let mut totals = HashMap::new();

    for caps in ranking_row_pattern().captures_iter(body).take(max_entries) {
        let country = caps[1].to_uppercase();
        let value = &caps[2];
        let count: u32 = value.parse().map_err(|_| FleetFetchError::Parse {
            country: country.clone(),
            value: value.to_string(),
        })?;
        totals.insert(country, count);
    }

    if totals.is_empty() {
        return Err(FleetFetchError::NoEntries);
    }
    Ok(totals)
}

/// Ranking page fetched over HTTP with a hard timeout.
pub struct HttpFleetSource {
    client: Client,
    endpoint: String,
    timeout_seconds: u64,
    max_entries: usize,
}

impl HttpFleetSource {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64, max_entries: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            endpoint: endpoint.into(),
            timeout_seconds,
            max_entries,
        }
    }

    fn classify_transport(&self, err: reqwest::Error) -> FleetFetchError {
        if err.is_timeout() {
            FleetFetchError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else {
            FleetFetchError::Transport(err)
        }
    }
}

#[async_trait]
impl FleetSource for HttpFleetSource {
    async fn fetch_totals(&self) -> std::result::Result<HashMap<String, u32>, FleetFetchError> {
        tracing::debug!("Requesting fleet rankings from: {}", self.endpoint);
        // The client timeout covers connect and body; this guards the whole exchange.
        let budget = Duration::from_secs(self.timeout_seconds);

        let exchange = async {
            let response = self
                .client
                .get(&self.endpoint)
                .send()
                .await
                .map_err(|e| self.classify_transport(e))?;

            tracing::debug!("Ranking source status: {}", response.status());
            if !response.status().is_success() {
                return Err(FleetFetchError::Status(response.status().as_u16()));
            }

            let body = response
                .text()
                .await
                .map_err(|e| self.classify_transport(e))?;
            Ok::<_, FleetFetchError>(body)
        };

        let body = tokio::time::timeout(budget, exchange)
            .await
            .map_err(|_| FleetFetchError::Timeout {
                seconds: self.timeout_seconds,
            })??;

        parse_rankings(&body, self.max_entries)
    }
}

/// Source used for offline runs; always declines.
pub struct DisabledFleetSource;

#[async_trait]
impl FleetSource for DisabledFleetSource {
    async fn fetch_totals(&self) -> std::result::Result<HashMap<String, u32>, FleetFetchError> {
        Err(FleetFetchError::Disabled)
    }
}

#[async_trait]
impl FleetSource for Box<dyn FleetSource> {
    async fn fetch_totals(&self) -> std::result::Result<HashMap<String, u32>, FleetFetchError> {
        (**self).fetch_totals().await
    }
}

pub struct FleetDataProvider<F: FleetSource> {
    defaults: FleetDefaults,
    source: F,
}

impl<F: FleetSource> FleetDataProvider<F> {
    pub fn new(defaults: FleetDefaults, source: F) -> Self {
        Self { defaults, source }
    }

    pub fn defaults(&self) -> &FleetDefaults {
        &self.defaults
    }

    /// Resolve both fleet tables. Live rows override the default totals; any
    /// fetch failure leaves the defaults untouched.
    pub async fn get_fleets(&self) -> FleetTables {
        let mut total = self.defaults.total.clone();
        let mut live = false;

        match self.source.fetch_totals().await {
            Ok(rows) => {
                tracing::info!("✓ Live fleet rankings applied ({} rows)", rows.len());
                live = true;
                total.extend(rows);
            }
            Err(FleetFetchError::Disabled) => {
                tracing::info!("Fleet source disabled, using built-in fleet tables");
            }
            Err(e) => {
                tracing::warn!("⚠ Fleet rankings unavailable ({}), using built-in tables", e);
            }
        }

        FleetTables {
            total,
            combat: self.defaults.combat.clone(),
            missing_total: self.defaults.missing_total,
            missing_combat: self.defaults.missing_combat,
            live,
        }
    }
}
