use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use ndarray::{Array2, ArrayViewMut1};

use crate::{
    config::PipelineConfig,
    models::{Scores, Title},
    services::stop_words::is_stop_word,
};

/// Column layout of the feature matrix, fixed once at fit time
///
/// Text terms come first, then genre labels, then the numeric scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    pub terms: Vec<String>,
    pub genres: Vec<String>,
    pub numeric: Vec<String>,
}

impl FeatureSchema {
    pub fn width(&self) -> usize {
        self.terms.len() + self.genres.len() + self.numeric.len()
    }

    pub fn text_range(&self) -> Range<usize> {
        0..self.terms.len()
    }

    pub fn genre_range(&self) -> Range<usize> {
        let start = self.terms.len();
        start..start + self.genres.len()
    }

    pub fn numeric_range(&self) -> Range<usize> {
        let start = self.terms.len() + self.genres.len();
        start..start + self.numeric.len()
    }

    /// Column names in matrix order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .chain(self.genres.iter())
            .chain(self.numeric.iter())
            .map(String::as_str)
    }
}

/// Lowercased word tokens of at least two characters, stop words removed
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
}

/// TF-IDF weighting over a fixed vocabulary
///
/// Vocabulary keeps the `max_features` most frequent terms of the corpus
/// (ties by term), with columns in term order. IDF is smoothed,
/// `ln((1 + n) / (1 + df)) + 1`, and every transformed row is L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    terms: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen = BTreeSet::new();
            for token in tokenize(doc.as_ref()) {
                *corpus_counts.entry(token.clone()).or_insert(0) += 1;
                seen.insert(token);
            }
            for token in seen {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        Self {
            terms,
            vocabulary,
            idf,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Writes the weights of `document` into `row`, which must be vocabulary-wide
    pub fn transform_into(&self, document: &str, mut row: ArrayViewMut1<'_, f64>) {
        row.fill(0.0);
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                row[idx] += 1.0;
            }
        }

        row.zip_mut_with(&ndarray::aview1(&self.idf), |weight, idf| *weight *= idf);

        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row /= norm;
        }
    }

    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f64> {
        let mut block = Array2::zeros((documents.len(), self.terms.len()));
        for (doc, row) in documents.iter().zip(block.rows_mut()) {
            self.transform_into(doc.as_ref(), row);
        }
        block
    }
}

/// Binary membership columns for genre labels
#[derive(Debug, Clone)]
pub struct GenreEncoder {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl GenreEncoder {
    /// Collects every distinct label, ordered by label
    pub fn fit<'a, I>(genre_lists: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let labels: Vec<String> = genre_lists
            .into_iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.clone(), idx))
            .collect();
        Self { labels, index }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn transform<'a, I>(&self, genre_lists: I) -> Array2<f64>
    where
        I: ExactSizeIterator<Item = &'a [String]>,
    {
        let mut block = Array2::zeros((genre_lists.len(), self.labels.len()));
        for (row, genres) in genre_lists.enumerate() {
            for genre in genres {
                if let Some(&col) = self.index.get(genre) {
                    block[[row, col]] = 1.0;
                }
            }
        }
        block
    }
}

/// Observed range of one numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Maps `value` into [0, 1]; a constant column maps to 0
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Per-column min-max rescaling of the four score columns
///
/// Absent values stay absent (NaN in the output block) and do not
/// contribute to the observed range.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    ranges: [Option<ColumnRange>; 4],
}

impl MinMaxScaler {
    pub fn fit<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = &'a Scores>,
    {
        let mut ranges: [Option<ColumnRange>; 4] = [None; 4];
        for row in scores {
            for (range, value) in ranges.iter_mut().zip(row.as_array()) {
                let Some(value) = value.filter(|v| v.is_finite()) else {
                    continue;
                };
                *range = Some(match *range {
                    Some(r) => ColumnRange {
                        min: r.min.min(value),
                        max: r.max.max(value),
                    },
                    None => ColumnRange {
                        min: value,
                        max: value,
                    },
                });
            }
        }
        Self { ranges }
    }

    pub fn ranges(&self) -> &[Option<ColumnRange>; 4] {
        &self.ranges
    }

    pub fn transform<'a, I>(&self, scores: I) -> Array2<f64>
    where
        I: ExactSizeIterator<Item = &'a Scores>,
    {
        let mut block = Array2::from_elem((scores.len(), Scores::COLUMNS.len()), f64::NAN);
        for (row, values) in scores.enumerate() {
            for (col, value) in values.as_array().into_iter().enumerate() {
                if let (Some(value), Some(range)) = (value, self.ranges[col]) {
                    if value.is_finite() {
                        block[[row, col]] = range.scale(value);
                    }
                }
            }
        }
        block
    }
}

/// The three per-title blocks, row-aligned with the input titles
#[derive(Debug, Clone)]
pub struct EncodedBlocks {
    pub schema: FeatureSchema,
    pub text: Array2<f64>,
    pub genres: Array2<f64>,
    pub numeric: Array2<f64>,
}

/// Fits all three encoders on `titles` and encodes every title
pub fn encode(titles: &[Title], config: PipelineConfig) -> EncodedBlocks {
    let descriptions: Vec<&str> = titles.iter().map(|t| t.description.as_str()).collect();
    let vectorizer = TfidfVectorizer::fit(&descriptions, config.max_features);
    let text = vectorizer.transform(&descriptions);

    let genre_encoder = GenreEncoder::fit(titles.iter().map(|t| t.genres.as_slice()));
    let genres = genre_encoder.transform(titles.iter().map(|t| t.genres.as_slice()));

    let scaler = MinMaxScaler::fit(titles.iter().map(|t| &t.scores));
    let numeric = scaler.transform(titles.iter().map(|t| &t.scores));

    tracing::info!(
        titles = titles.len(),
        terms = vectorizer.terms().len(),
        genres = genre_encoder.labels().len(),
        "Features encoded"
    );

    EncodedBlocks {
        schema: FeatureSchema {
            terms: vectorizer.terms().to_vec(),
            genres: genre_encoder.labels().to_vec(),
            numeric: Scores::COLUMNS.iter().map(|c| c.to_string()).collect(),
        },
        text,
        genres,
        numeric,
    }
}
