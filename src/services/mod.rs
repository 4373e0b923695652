pub mod assembler;
pub mod catalog_stats;
pub mod encoder;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod recommender;
pub mod similarity;
pub mod stop_words;

pub use normalizer::Catalog;
pub use recommender::Recommender;
