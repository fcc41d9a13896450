//! Plain-text edge lists: one `keyA keyB` pair per line

use crate::error::BridgeCutError;
use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Read an edge list file
pub fn load_edge_pairs(path: &str) -> Result<Vec<(String, String)>> {
    log::info!("Reading edge list: {}", path);

    let file = File::open(path)?;
    let pairs = parse_edge_pairs(BufReader::new(file))?;

    log::info!("Loaded {} edge records", pairs.len());
    Ok(pairs)
}

/// Parse edge records from a reader.
///
/// Keys are separated by spaces or tabs. Blank lines and lines starting with `#`
/// are skipped; any other line must hold exactly two keys. Errors carry the
/// zero-based line number.
pub fn parse_edge_pairs<R: BufRead>(reader: R) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;

        // Skip blank lines and comments
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Keys are separated by any run of spaces or tabs
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match fields.as_slice() {
            [a, b] => pairs.push((a.to_string(), b.to_string())),
            _ => {
                return Err(BridgeCutError::malformed(
                    line_no,
                    format!("expected 2 node keys, found {}", fields.len()),
                )
                .into())
            }
        }
    }

    Ok(pairs)
}
