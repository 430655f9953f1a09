//! Loader for the HDB carpark information CSV.

use std::io::Read;
use std::path::Path;

use hdbpark_core::ReferenceRow;

use crate::error::FeedError;

/// Reads every row of the reference dataset at `path`.
///
/// # Errors
///
/// Returns [`FeedError::ReferenceIo`] if the file cannot be opened and
/// [`FeedError::ReferenceCsv`] if any row fails to parse.
pub fn load_reference_csv(path: &Path) -> Result<Vec<ReferenceRow>, FeedError> {
    let file = std::fs::File::open(path).map_err(|e| FeedError::ReferenceIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let rows = parse_reference_csv(file, &path.display().to_string())?;
    tracing::info!(path = %path.display(), rows = rows.len(), "loaded reference dataset");
    Ok(rows)
}

/// Parses reference rows from any CSV source with a header line.
///
/// `context` names the source in error messages. Fields are trimmed, and the
/// reported row number counts the header as line 1.
///
/// # Errors
///
/// Returns [`FeedError::ReferenceCsv`] for the first row that fails to parse.
pub fn parse_reference_csv<R: Read>(
    reader: R,
    context: &str,
) -> Result<Vec<ReferenceRow>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<ReferenceRow>()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| FeedError::ReferenceCsv {
                context: format!("{context} line {}", idx + 2),
                source: e,
            })
        })
        .collect()
}
