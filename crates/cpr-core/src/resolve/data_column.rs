//! Data-column lookup against the provider's tabular metadata interface.

use crate::provider::{ContentSource, RowFilter, COLUMN_DATA};
use crate::uri::ContentUri;

/// Value of the conventional `_data` column for the first row matching
/// `uri` (and `filter`, when given).
///
/// `None` on an empty result, a missing column, or a failed query; query
/// failures are logged at debug and never propagate. The row returned by
/// the source owns its data, so every exit path releases the query.
pub fn query_data_column(
    source: &dyn ContentSource,
    uri: &ContentUri,
    filter: Option<&RowFilter>,
) -> Option<String> {
    let row = match source.query_first(uri, Some(&[COLUMN_DATA]), filter) {
        Ok(row) => row?,
        Err(err) => {
            tracing::debug!("data column query failed for {}: {:#}", uri, err);
            return None;
        }
    };
    row.get(COLUMN_DATA).map(str::to_string)
}
