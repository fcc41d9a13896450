//! Parquet file handling for edge lists

use anyhow::{anyhow, Result};
use polars::prelude::*;

/// Load `(source, target)` pairs from two columns of a Parquet file.
///
/// Both columns are cast to strings, so integer ids work as keys. A row with a
/// null in either column is rejected.
pub fn load_edge_pairs(
    path: &str,
    source_column: &str,
    target_column: &str,
) -> Result<Vec<(String, String)>> {
    log::info!("Reading parquet file: {}", path);

    // Only the two key columns are read, cast so integer ids work too
    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select([
            col(source_column).cast(DataType::String).alias("source"),
            col(target_column).cast(DataType::String).alias("target"),
        ])
        .collect()?;

    // Print schema to debug
    log::debug!("File schema: {:?}", df.schema());
    log::info!("Loaded {} edge records", df.height());

    // Get the columns we need for processing
    let source = df.column("source")?.str()?;
    let target = df.column("target")?.str()?;

    let mut pairs = Vec::with_capacity(df.height());
    // Collect pairs row by row, refusing nulls
    for i in 0..df.height() {
        match (source.get(i), target.get(i)) {
            (Some(src), Some(dst)) => pairs.push((src.to_string(), dst.to_string())),
            _ => {
                return Err(anyhow!(
                    "Null key in row {} (columns '{}' and '{}')",
                    i,
                    source_column,
                    target_column
                ))
            }
        }
    }

    Ok(pairs)
}
