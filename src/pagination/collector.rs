//! Eager collection of a lazy enumeration

use super::fetcher::PageFetcher;
use super::lazy::LazyPaginator;
use crate::error::Result;
use tracing::debug;

/// Drain `paginator` into a `Vec`, preserving server order
///
/// The first fetch error aborts collection and is returned as is; pages
/// fetched before it are not undone.
pub async fn collect_all<T, F>(mut paginator: LazyPaginator<T, F>) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    let mut items = Vec::new();
    while let Some(item) = paginator.next_item().await {
        items.push(item?);
    }

    debug!(
        pages = paginator.pages_fetched(),
        items = items.len(),
        "Collected enumeration"
    );

    Ok(items)
}

/// Drain `paginator`, then keep at most `max` items (`0` keeps everything)
///
/// The limit is applied after collection; it never reduces the number of
/// pages requested.
pub async fn collect_with_max<T, F>(paginator: LazyPaginator<T, F>, max: usize) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    let mut items = collect_all(paginator).await?;
    if max > 0 {
        items.truncate(max);
    }
    Ok(items)
}
