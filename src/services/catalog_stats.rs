use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{models::Role, services::normalizer::Catalog};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Frequency aggregates over the normalized catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogStats {
    pub titles: usize,
    pub credits: usize,
    pub release_years: Vec<YearCount>,
    pub top_genres: Vec<LabelCount>,
    pub top_countries: Vec<LabelCount>,
    pub top_actors: Vec<LabelCount>,
    pub imdb_score: Option<ScoreSummary>,
    pub tmdb_score: Option<ScoreSummary>,
}

pub fn compute(catalog: &Catalog, top: usize) -> CatalogStats {
    let titles = catalog.titles();

    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for year in titles.iter().filter_map(|t| t.release_year) {
        *years.entry(year).or_insert(0) += 1;
    }

    CatalogStats {
        titles: titles.len(),
        credits: catalog.credits().count(),
        release_years: years
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect(),
        top_genres: top_counts(
            titles.iter().flat_map(|t| t.genres.iter().map(String::as_str)),
            top,
        ),
        top_countries: top_counts(
            titles
                .iter()
                .flat_map(|t| t.production_countries.iter().map(String::as_str)),
            top,
        ),
        top_actors: top_counts(
            catalog
                .credits()
                .filter(|c| c.role == Role::Actor)
                .map(|c| c.name.as_str()),
            top,
        ),
        imdb_score: summarize(titles.iter().filter_map(|t| t.scores.imdb_score)),
        tmdb_score: summarize(titles.iter().filter_map(|t| t.scores.tmdb_score)),
    }
}

/// Most frequent labels, ties broken by label
fn top_counts<'a, I>(labels: I, top: usize) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(top)
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

fn summarize<I: IntoIterator<Item = f64>>(values: I) -> Option<ScoreSummary> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values.into_iter().filter(|v| v.is_finite()) {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    (count > 0).then(|| ScoreSummary {
        count,
        min,
        max,
        mean: sum / count as f64,
    })
}
