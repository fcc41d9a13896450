//! Edge list loading

pub mod edgelist;
pub mod parquet;

use anyhow::{anyhow, Result};
use std::path::Path;

/// Load `(keyA, keyB)` pairs from a Parquet file or a whitespace separated text file.
///
/// The column names only matter for Parquet input.
pub fn load_edge_pairs(
    path: &str,
    source_column: &str,
    target_column: &str,
) -> Result<Vec<(String, String)>> {
    // Check if the file exists
    let file = Path::new(path);
    if !file.exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    // Anything that is not Parquet is read as a text edge list
    let is_parquet = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        parquet::load_edge_pairs(path, source_column, target_column)
    } else {
        edgelist::load_edge_pairs(path)
    }
}
