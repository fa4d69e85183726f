//! Sequential lookup over derived queries.

use crate::query::derive_queries;
use crate::{ExternalSummaryResult, SummaryResponse, SummarySource};

/// Tries each query in order against `source`.
///
/// - The first hit is reported as [`ExternalSummaryResult::Found`]; a
///   missing title falls back to the query that matched.
/// - "Not found" moves on to the next query.
/// - Any other failure stops immediately with
///   [`ExternalSummaryResult::Error`]. Remaining queries are not tried.
///
/// If every query is "not found" (or there are none) the result is
/// [`ExternalSummaryResult::NotFound`]. Attempts never overlap and are
/// never retried.
pub async fn lookup(source: &dyn SummarySource, queries: &[String]) -> ExternalSummaryResult {
    for query in queries {
        match source.fetch(query).await {
            Ok(SummaryResponse::Found(page)) => {
                log::debug!("Summary found for '{query}' via {}", source.id());
                return ExternalSummaryResult::Found {
                    title: page.title.unwrap_or_else(|| query.clone()),
                    extract: page.extract,
                    url: page.url,
                };
            }
            Ok(SummaryResponse::NotFound) => {
                log::debug!("No summary for '{query}' via {}", source.id());
            }
            Err(e) => {
                log::warn!("Summary lookup for '{query}' via {} failed: {e}", source.id());
                return ExternalSummaryResult::Error;
            }
        }
    }

    ExternalSummaryResult::NotFound
}

/// Derives queries from a display name and runs [`lookup`].
pub async fn fetch_summary(source: &dyn SummarySource, display_name: &str) -> ExternalSummaryResult {
    let queries = derive_queries(display_name);
    lookup(source, &queries).await
}
