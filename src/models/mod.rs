use serde::{Deserialize, Serialize};

mod credit;
mod title;

pub use credit::{Credit, RawCredit, Role};
pub use title::{RawTitle, Scores, Title, TitleSummary};

/// A similar title returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    /// Cosine similarity to the query title
    pub score: f64,
}

/// Normalized title together with its cast and crew
#[derive(Debug, Clone, Serialize)]
pub struct TitleDetails {
    #[serde(flatten)]
    pub title: Title,
    pub credits: Vec<Credit>,
    /// False when the title was dropped from the feature matrix
    pub recommendable: bool,
}
