use ndarray::{concatenate, Array2, ArrayView1, Axis};

use crate::{
    error::{AppError, AppResult},
    models::Title,
    services::encoder::{EncodedBlocks, FeatureSchema},
};

/// One row per retained title, one column per schema entry
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    schema: FeatureSchema,
    values: Array2<f64>,
    title_ids: Vec<String>,
    source_rows: Vec<usize>,
}

impl FeatureMatrix {
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Title id of each retained row, in row order
    pub fn title_ids(&self) -> &[String] {
        &self.title_ids
    }

    /// Position of each retained row in the input title list
    pub fn source_rows(&self) -> &[usize] {
        &self.source_rows
    }

    pub fn row(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(idx)
    }
}

/// Concatenates the encoded blocks and drops rows holding any NaN
///
/// `titles` must be the slice the blocks were encoded from; retained rows
/// keep their relative order.
pub fn assemble(blocks: EncodedBlocks, titles: &[Title]) -> AppResult<FeatureMatrix> {
    let EncodedBlocks {
        schema,
        text,
        genres,
        numeric,
    } = blocks;

    if [text.nrows(), genres.nrows(), numeric.nrows()]
        .iter()
        .any(|&rows| rows != titles.len())
    {
        return Err(AppError::Internal(format!(
            "Feature blocks are not aligned with {} titles",
            titles.len()
        )));
    }

    let full = concatenate(Axis(1), &[text.view(), genres.view(), numeric.view()])
        .map_err(|e| AppError::Internal(format!("Failed to concatenate feature blocks: {}", e)))?;

    let source_rows: Vec<usize> = full
        .rows()
        .into_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().all(|v| !v.is_nan()))
        .map(|(idx, _)| idx)
        .collect();

    let dropped = titles.len() - source_rows.len();
    if dropped > 0 {
        tracing::warn!(dropped, "Titles with undefined features left out of the matrix");
    }

    let values = full.select(Axis(0), &source_rows);
    let title_ids = source_rows.iter().map(|&idx| titles[idx].id.clone()).collect();

    tracing::info!(
        rows = values.nrows(),
        columns = values.ncols(),
        "Feature matrix assembled"
    );

    Ok(FeatureMatrix {
        schema,
        values,
        title_ids,
        source_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scores;
    use ndarray::array;

    fn title(id: &str) -> Title {
        Title {
            id: id.to_string(),
            title: id.to_uppercase(),
            kind: None,
            description: String::new(),
            release_year: None,
            age_certification: String::new(),
            genres: vec![],
            production_countries: vec![],
            scores: Scores::default(),
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema {
            terms: vec!["space".into()],
            genres: vec!["drama".into()],
            numeric: vec!["imdb_score".into()],
        }
    }

    #[test]
    fn test_assemble_drops_nan_rows_and_keeps_alignment() {
        let titles = vec![title("a"), title("b"), title("c")];
        let blocks = EncodedBlocks {
            schema: schema(),
            text: array![[1.0], [0.0], [0.5]],
            genres: array![[0.0], [1.0], [1.0]],
            numeric: array![[0.2], [f64::NAN], [0.9]],
        };

        let matrix = assemble(blocks, &titles).unwrap();
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.values().ncols(), matrix.schema().width());
        assert_eq!(matrix.title_ids(), ["a", "c"]);
        assert_eq!(matrix.source_rows(), [0, 2]);
        assert_eq!(matrix.row(1).to_vec(), vec![0.5, 1.0, 0.9]);
    }

    #[test]
    fn test_assemble_rejects_misaligned_blocks() {
        let titles = vec![title("a"), title("b")];
        let blocks = EncodedBlocks {
            schema: schema(),
            text: array![[1.0], [0.0]],
            genres: array![[0.0]],
            numeric: array![[0.2], [0.1]],
        };

        assert!(matches!(assemble(blocks, &titles), Err(AppError::Internal(_))));
    }
}
