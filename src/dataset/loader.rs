// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot asynchronous dataset loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::aggregate::aggregate;
use super::error::LoadError;
use super::ingest::{parse_food_rows, parse_synonym_rows};
use super::model::FoodSummary;
use super::synonyms::SynonymTable;

/// Default file name of the food table.
pub const DEFAULT_FOODS_FILE: &str = "foods.csv";
/// Default file name of the synonym table.
pub const DEFAULT_SYNONYMS_FILE: &str = "synonyms.csv";

/// Where the two tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub foods: PathBuf,
    pub synonyms: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            foods: PathBuf::from(DEFAULT_FOODS_FILE),
            synonyms: PathBuf::from(DEFAULT_SYNONYMS_FILE),
        }
    }
}

impl DatasetPaths {
    pub fn new(foods: impl Into<PathBuf>, synonyms: impl Into<PathBuf>) -> Self {
        Self {
            foods: foods.into(),
            synonyms: synonyms.into(),
        }
    }
}

/// A fully loaded, immutable dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub summaries: Arc<Vec<FoodSummary>>,
    pub synonyms: Arc<SynonymTable>,
}

impl Dataset {
    pub fn new(summaries: Vec<FoodSummary>, synonyms: SynonymTable) -> Self {
        Self {
            summaries: Arc::new(summaries),
            synonyms: Arc::new(synonyms),
        }
    }

    /// Decode both tables from CSV text.
    pub fn from_csv_text(foods_csv: &str, synonyms_csv: &str) -> Result<Self, LoadError> {
        let rows = parse_food_rows(foods_csv)?;
        let summaries = aggregate(&rows);
        let synonyms = SynonymTable::from_rows(&parse_synonym_rows(synonyms_csv)?);
        Ok(Self::new(summaries, synonyms))
    }

    /// Find a summary by exact (trimmed) name.
    pub fn find(&self, name: &str) -> Option<&FoodSummary> {
        let name = name.trim();
        self.summaries.iter().find(|s| s.name == name)
    }
}

async fn read_resource(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read and decode both tables. Any failure ends the attempt; there is no
/// retry.
pub async fn load(paths: &DatasetPaths) -> Result<Dataset, LoadError> {
    debug!(foods = %paths.foods.display(), synonyms = %paths.synonyms.display(), "Loading dataset");

    let foods_csv = read_resource(&paths.foods).await?;
    let synonyms_csv = read_resource(&paths.synonyms).await?;
    let dataset = Dataset::from_csv_text(&foods_csv, &synonyms_csv)?;

    info!(
        foods = dataset.summaries.len(),
        synonym_keys = dataset.synonyms.len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FOODS: &str = "food_kr,source_reliability,source_name,rule_source,임산부_정보유무,임산부_주의\n\
커피,gov,Clinic,https://a.example,TRUE,주의\n\
커피우유,blog,Blog,https://b.example,TRUE,safe\n";

    const SYNONYMS: &str = "key,aliases\n커피,coffee|카페\n";

    #[tokio::test]
    async fn loads_both_tables_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let foods = dir.path().join("foods.csv");
        let synonyms = dir.path().join("synonyms.csv");
        std::fs::write(&foods, FOODS).expect("write foods");
        std::fs::write(&synonyms, SYNONYMS).expect("write synonyms");

        let dataset = load(&DatasetPaths::new(&foods, &synonyms))
            .await
            .expect("load");
        assert_eq!(dataset.summaries.len(), 2);
        assert_eq!(dataset.synonyms.len(), 1);
        assert!(dataset.find(" 커피 ").is_some());
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let dir = TempDir::new().expect("tempdir");
        let foods = dir.path().join("foods.csv");
        std::fs::write(&foods, FOODS).expect("write foods");

        let err = load(&DatasetPaths::new(&foods, dir.path().join("absent.csv")))
            .await
            .expect_err("missing synonyms");
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
