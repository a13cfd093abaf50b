// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV decoding for the food and synonym tables.
//!
//! Both tables use standard quoted CSV (`""` escapes a quote). Header names and
//! cells are trimmed, short rows are padded with blanks, blank lines skipped.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;

use super::error::LoadError;

/// Food name in Korean; the grouping key.
pub const COL_FOOD: &str = "food_kr";
/// Reliability as a number or a tier label.
pub const COL_RELIABILITY: &str = "source_reliability";
/// Display name of the source.
pub const COL_SOURCE: &str = "source_name";
/// Source URL.
pub const COL_URL: &str = "rule_source";
/// Boolean-like flag: does the row carry pregnancy information?
pub const COL_HAS_INFO: &str = "임산부_정보유무";
/// Verdict label.
pub const COL_VERDICT: &str = "임산부_주의";

pub const COL_SYNONYM_KEY: &str = "key";
pub const COL_SYNONYM_ALIASES: &str = "aliases";

const FOODS_RESOURCE: &str = "foods table";
const SYNONYMS_RESOURCE: &str = "synonyms table";

/// One undecoded row of the food table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFoodRow {
    pub food_name: String,
    pub reliability: String,
    pub source_name: String,
    pub url: String,
    pub has_info: String,
    pub verdict_label: String,
}

/// One row of the synonym table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSynonymRow {
    pub key: String,
    pub aliases: String,
}

struct Columns {
    by_name: HashMap<String, usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Self {
        let mut by_name = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            by_name.entry(name.trim().to_string()).or_insert(idx);
        }
        Self { by_name }
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    fn cell(record: &StringRecord, idx: Option<usize>) -> String {
        idx.and_then(|i| record.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Decode the food table.
pub fn parse_food_rows(text: &str) -> Result<Vec<RawFoodRow>, LoadError> {
    let mut rdr = reader(text);
    let header = rdr
        .headers()
        .map_err(|source| LoadError::Csv {
            resource: FOODS_RESOURCE,
            source,
        })?
        .clone();
    if header.is_empty() {
        return Ok(Vec::new());
    }

    let columns = Columns::from_header(&header);
    let food = columns.index(COL_FOOD).ok_or(LoadError::MissingColumn {
        resource: FOODS_RESOURCE,
        column: COL_FOOD,
    })?;
    let reliability = columns.index(COL_RELIABILITY);
    let source = columns.index(COL_SOURCE);
    let url = columns.index(COL_URL);
    let has_info = columns.index(COL_HAS_INFO);
    let verdict = columns.index(COL_VERDICT);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| LoadError::Csv {
            resource: FOODS_RESOURCE,
            source,
        })?;
        if is_blank(&record) {
            continue;
        }
        rows.push(RawFoodRow {
            food_name: Columns::cell(&record, Some(food)),
            reliability: Columns::cell(&record, reliability),
            source_name: Columns::cell(&record, source),
            url: Columns::cell(&record, url),
            has_info: Columns::cell(&record, has_info),
            verdict_label: Columns::cell(&record, verdict),
        });
    }
    Ok(rows)
}

/// Decode the synonym table. A table without `key` and `aliases` headers is
/// treated as empty.
pub fn parse_synonym_rows(text: &str) -> Result<Vec<RawSynonymRow>, LoadError> {
    let mut rdr = reader(text);
    let header = rdr
        .headers()
        .map_err(|source| LoadError::Csv {
            resource: SYNONYMS_RESOURCE,
            source,
        })?
        .clone();

    let columns = Columns::from_header(&header);
    let (Some(key_idx), Some(alias_idx)) = (
        columns.index(COL_SYNONYM_KEY),
        columns.index(COL_SYNONYM_ALIASES),
    ) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| LoadError::Csv {
            resource: SYNONYMS_RESOURCE,
            source,
        })?;
        if record.len() <= key_idx.max(alias_idx) {
            continue;
        }
        rows.push(RawSynonymRow {
            key: Columns::cell(&record, Some(key_idx)),
            aliases: Columns::cell(&record, Some(alias_idx)),
        });
    }
    Ok(rows)
}
