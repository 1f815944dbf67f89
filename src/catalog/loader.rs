//! CSV catalog ingestion.
//!
//! Expected columns: Classification, ID, Objective, Core Tags,
//! Supplementary Tags, Mutually Exclusive With. Rows with non-numeric
//! Classification or ID are skipped with a logged reason rather than
//! aborting the load.

use std::path::Path;

use serde::Deserialize;

use crate::error::{BoardgenError, Result};

use super::{Catalog, Objective};

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Classification")]
    classification: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Objective")]
    objective: String,
    #[serde(rename = "Core Tags", default)]
    core_tags: String,
    #[serde(rename = "Supplementary Tags", default)]
    supp_tags: String,
    #[serde(rename = "Mutually Exclusive With", default)]
    restrictions: String,
}

/// Load a catalog from a CSV file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BoardgenError::CatalogNotFound(path.to_path_buf()));
    }

    // Spreadsheet exports often carry a UTF-8 BOM; strip it so the first
    // header parses as "Classification" rather than "\u{feff}Classification".
    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut catalog = Catalog::new();
    let mut skipped = 0usize;

    for (line, row) in reader.deserialize::<CatalogRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("skipping malformed catalog row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };

        let classification = match row.classification.trim().parse::<u32>() {
            Ok(c) => c,
            Err(_) => {
                tracing::warn!(
                    "skipping row {}: non-numeric classification {:?}",
                    line + 2,
                    row.classification
                );
                skipped += 1;
                continue;
            }
        };

        let id = match row.id.trim().parse::<u32>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!("skipping row {}: non-numeric id {:?}", line + 2, row.id);
                skipped += 1;
                continue;
            }
        };

        catalog.insert(
            classification,
            Objective {
                id,
                name: row.objective.trim().to_string(),
                core_tags: split_list(&row.core_tags),
                supp_tags: split_list(&row.supp_tags),
                restrictions: parse_restrictions(&row.restrictions, line + 2),
            },
        );
    }

    if skipped > 0 {
        tracing::warn!("catalog load skipped {} malformed row(s)", skipped);
    }
    if catalog.is_empty() {
        return Err(BoardgenError::EmptyCatalog);
    }

    Ok(catalog)
}

fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_restrictions(field: &str, line: usize) -> Vec<u32> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("row {}: ignoring non-numeric restriction {:?}", line, s);
                None
            }
        })
        .collect()
}
