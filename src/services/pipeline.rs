use std::time::Instant;

use crate::{
    config::{Config, PipelineConfig},
    error::AppResult,
    models::{RawCredit, RawTitle},
    services::{
        assembler::{assemble, FeatureMatrix},
        encoder::encode,
        loader,
        normalizer::{normalize, Catalog},
        recommender::Recommender,
        similarity::SimilarityMatrix,
    },
};

/// Encodes and assembles the feature matrix of a normalized catalog
pub fn build_features(catalog: &Catalog, config: PipelineConfig) -> AppResult<FeatureMatrix> {
    let blocks = encode(catalog.titles(), config);
    assemble(blocks, catalog.titles())
}

/// Runs normalize, encode, assemble and similarity in order
pub fn build(
    raw_titles: Vec<RawTitle>,
    raw_credits: Vec<RawCredit>,
    config: PipelineConfig,
) -> AppResult<Recommender> {
    let start = Instant::now();

    let catalog = normalize(raw_titles, raw_credits)?;
    let features = build_features(&catalog, config)?;
    let similarity = SimilarityMatrix::build(&features, catalog.titles());

    tracing::info!(
        titles = catalog.len(),
        recommendable = similarity.len(),
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendation pipeline completed"
    );

    Ok(Recommender::new(catalog, similarity))
}

/// Loads both CSV tables named in `config` and builds the recommender
pub fn build_from_files(config: &Config) -> AppResult<Recommender> {
    let titles = loader::load_titles(&config.titles_path)?;
    let credits = loader::load_credits(&config.credits_path)?;
    build(titles, credits, config.pipeline())
}
