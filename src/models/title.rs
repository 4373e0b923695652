use serde::{Deserialize, Serialize};

/// One row of the titles table as it appears on disk
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawTitle {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub age_certification: Option<String>,
    #[serde(default)]
    pub runtime: Option<f64>,
    /// List literal, e.g. `['drama', 'crime']`
    pub genres: String,
    /// List literal, e.g. `['US', 'GB']`
    pub production_countries: String,
    /// Only meaningful for shows; discarded during normalization
    #[serde(default)]
    pub seasons: Option<f64>,
    #[serde(default)]
    pub imdb_score: Option<f64>,
    #[serde(default)]
    pub tmdb_score: Option<f64>,
    #[serde(default)]
    pub tmdb_popularity: Option<f64>,
}

/// Numeric quality and popularity signals of a title
///
/// `None` marks a value absent from the source data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Scores {
    pub imdb_score: Option<f64>,
    pub tmdb_score: Option<f64>,
    pub tmdb_popularity: Option<f64>,
    pub runtime: Option<f64>,
}

impl Scores {
    /// Column names in feature order
    pub const COLUMNS: [&'static str; 4] = ["imdb_score", "tmdb_score", "tmdb_popularity", "runtime"];

    /// Values in the same order as [`Scores::COLUMNS`]
    pub fn as_array(&self) -> [Option<f64>; 4] {
        [
            self.imdb_score,
            self.tmdb_score,
            self.tmdb_popularity,
            self.runtime,
        ]
    }
}

/// A cleaned catalog title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: String,
    pub release_year: Option<i32>,
    pub age_certification: String,
    pub genres: Vec<String>,
    pub production_countries: Vec<String>,
    pub scores: Scores,
}

/// Compact reference to a title used in listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleSummary {
    pub id: String,
    pub title: String,
}

impl From<&Title> for TitleSummary {
    fn from(title: &Title) -> Self {
        Self {
            id: title.id.clone(),
            title: title.title.clone(),
        }
    }
}
