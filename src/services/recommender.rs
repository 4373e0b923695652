use crate::{
    error::{AppError, AppResult},
    models::{Recommendation, TitleDetails, TitleSummary},
    services::{normalizer::Catalog, similarity::SimilarityMatrix},
};

/// Read-only query layer over a built similarity matrix
///
/// Holds no interior mutability; share it behind an `Arc` for concurrent
/// readers.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl Recommender {
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Self {
        Self {
            catalog,
            similarity,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// The `k` titles most similar to the one displayed as `title`
    ///
    /// Fails with `NotFound` for an unknown name, `AmbiguousTitle` when the
    /// name is shared, and `InvalidInput` when `k` is zero. Fewer than `k`
    /// results come back when the matrix is smaller than `k + 1`.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        validate_k(k)?;
        let row = self.similarity.position_by_name(title)?;
        Ok(self.rank(row, k))
    }

    /// Same as [`Recommender::recommend`], keyed by title id
    pub fn recommend_by_id(&self, id: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        validate_k(k)?;
        let row = self.similarity.position_by_id(id)?;
        Ok(self.rank(row, k))
    }

    /// Recommendable titles in matrix order
    pub fn titles(&self) -> Vec<TitleSummary> {
        (0..self.similarity.len())
            .map(|idx| TitleSummary {
                id: self.similarity.id(idx).to_string(),
                title: self.similarity.name(idx).to_string(),
            })
            .collect()
    }

    pub fn details(&self, id: &str) -> AppResult<TitleDetails> {
        let title = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Title id '{}' not found", id)))?;

        Ok(TitleDetails {
            title: title.clone(),
            credits: self.catalog.cast(id).to_vec(),
            recommendable: self.similarity.position_by_id(id).is_ok(),
        })
    }

    fn rank(&self, row: usize, k: usize) -> Vec<Recommendation> {
        let scores = self.similarity.row(row);
        let mut candidates: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(idx, _)| idx != row)
            .collect();

        // Stable: equal scores keep column order
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        candidates
            .into_iter()
            .take(k)
            .map(|(idx, score)| Recommendation {
                id: self.similarity.id(idx).to_string(),
                title: self.similarity.name(idx).to_string(),
                score,
            })
            .collect()
    }
}

fn validate_k(k: usize) -> AppResult<()> {
    if k == 0 {
        return Err(AppError::InvalidInput(
            "Number of recommendations must be at least 1".to_string(),
        ));
    }
    Ok(())
}
