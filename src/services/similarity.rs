use std::collections::HashMap;

use ndarray::{Array2, ArrayView1, Axis};

use crate::{
    error::{AppError, AppResult},
    models::Title,
    services::assembler::FeatureMatrix,
};

/// Pairwise cosine similarity between all rows of `features`
///
/// The result is symmetric with values in [-1, 1]. A zero row scores 0
/// against every row, itself included; every other diagonal entry is 1.
/// Cost is O(n² · d) time and O(n²) memory for n rows of width d.
pub fn cosine_similarity_matrix(features: &Array2<f64>) -> Array2<f64> {
    let n = features.nrows();
    let norms: Vec<f64> = features
        .rows()
        .into_iter()
        .map(|row| row.dot(&row).sqrt())
        .collect();

    let mut unit = features.to_owned();
    for (mut row, &norm) in unit.axis_iter_mut(Axis(0)).zip(&norms) {
        if norm > 0.0 {
            row /= norm;
        }
    }

    let mut sims = unit.dot(&unit.t());
    for i in 0..n {
        sims[[i, i]] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
        for j in (i + 1)..n {
            let value = sims[[i, j]].clamp(-1.0, 1.0);
            sims[[i, j]] = value;
            sims[[j, i]] = value;
        }
    }
    sims
}

/// Square similarity matrix labelled by title id and display name
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
    ids: Vec<String>,
    names: Vec<String>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, Vec<usize>>,
}

impl SimilarityMatrix {
    /// Scores every retained row of `features`
    ///
    /// `titles` is the slice the matrix was assembled from; it supplies the
    /// display names for the retained rows.
    pub fn build(features: &FeatureMatrix, titles: &[Title]) -> Self {
        let values = cosine_similarity_matrix(features.values());
        let ids = features.title_ids().to_vec();
        let names: Vec<String> = features
            .source_rows()
            .iter()
            .map(|&row| titles[row].title.clone())
            .collect();

        let by_id = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            by_name.entry(name.clone()).or_default().push(idx);
        }

        let duplicated = by_name.values().filter(|rows| rows.len() > 1).count();
        if duplicated > 0 {
            tracing::warn!(
                duplicated,
                "Display names shared by several titles; lookup by id for those"
            );
        }

        tracing::info!(size = ids.len(), "Similarity matrix computed");

        Self {
            values,
            ids,
            names,
            by_id,
            by_name,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn row(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(idx)
    }

    pub fn position_by_id(&self, id: &str) -> AppResult<usize> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Title id '{}' is not in the matrix", id)))
    }

    /// Row of the unique title called `name`
    pub fn position_by_name(&self, name: &str) -> AppResult<usize> {
        match self.by_name.get(name).map(Vec::as_slice) {
            Some([idx]) => Ok(*idx),
            Some(rows) if !rows.is_empty() => Err(AppError::AmbiguousTitle {
                title: name.to_string(),
                ids: rows.iter().map(|&idx| self.ids[idx].clone()).collect(),
            }),
            _ => Err(AppError::NotFound(format!(
                "Title '{}' is not in the matrix",
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cosine_similarity_known_values() {
        let features = array![[1.0, 0.0], [1.0, 1.0], [0.0, 2.0]];
        let sims = cosine_similarity_matrix(&features);

        let half_sqrt2 = 1.0 / 2.0f64.sqrt();
        assert!((sims[[0, 1]] - half_sqrt2).abs() < 1e-12);
        assert!((sims[[1, 2]] - half_sqrt2).abs() < 1e-12);
        assert_eq!(sims[[0, 2]], 0.0);
    }

    #[test]
    fn test_cosine_similarity_is_symmetric_with_unit_diagonal() {
        let features = array![
            [0.3, 0.1, 0.0, 0.7],
            [0.2, 0.9, 0.4, 0.1],
            [0.0, 0.0, 1.0, 0.5],
            [0.6, 0.6, 0.6, 0.6]
        ];
        let sims = cosine_similarity_matrix(&features);

        for i in 0..4 {
            assert_eq!(sims[[i, i]], 1.0);
            for j in 0..4 {
                assert_eq!(sims[[i, j]], sims[[j, i]]);
                assert!((-1.0..=1.0).contains(&sims[[i, j]]));
            }
        }
    }

    #[test]
    fn test_zero_row_scores_zero_everywhere() {
        let features = array![[0.0, 0.0], [1.0, 2.0]];
        let sims = cosine_similarity_matrix(&features);
        assert_eq!(sims[[0, 0]], 0.0);
        assert_eq!(sims[[0, 1]], 0.0);
        assert_eq!(sims[[1, 0]], 0.0);
        assert_eq!(sims[[1, 1]], 1.0);
    }

    #[test]
    fn test_empty_matrix() {
        let features = Array2::<f64>::zeros((0, 3));
        assert_eq!(cosine_similarity_matrix(&features).shape(), &[0, 0]);
    }
}
