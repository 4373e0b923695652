use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the titles CSV file
    #[serde(default = "default_titles_path")]
    pub titles_path: String,

    /// Path to the credits CSV file
    #[serde(default = "default_credits_path")]
    pub credits_path: String,

    /// Maximum TF-IDF vocabulary size
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Number of recommendations returned when a query omits `k`
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Knobs that shape the feature matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub max_features: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
        }
    }
}

fn default_titles_path() -> String {
    "./Data/titles.csv".to_string()
}

fn default_credits_path() -> String {
    "./Data/credits.csv".to_string()
}

fn default_max_features() -> usize {
    5000
}

fn default_recommendations() -> usize {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            max_features: self.max_features,
        }
    }
}
