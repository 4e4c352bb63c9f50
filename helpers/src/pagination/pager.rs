//! Pager
//!
//! Runs a filtered query through a [`QueryExecutor`] one page at a time: one
//! count over the full query, one fetch over the page window.

use sqlx::FromRow;

use super::error::PageError;
use super::page::{Page, PageArgs};
use crate::data::query::SelectQuery;
use crate::data::{DataError, QueryExecutor};

/// Fetch page `page` (1-based) of `size` rows of `query`, decoded into `R`
pub async fn paginate<E, R>(
    executor: &E,
    query: &SelectQuery,
    page: u32,
    size: u32,
) -> Result<Page<R>, PageError>
where
    E: QueryExecutor,
    R: for<'r> FromRow<'r, E::Row>,
{
    paginate_with(executor, query, page, size, |row| row).await
}

/// [`paginate`] mapping every decoded row through `serialize`
pub async fn paginate_with<E, R, T, F>(
    executor: &E,
    query: &SelectQuery,
    page: u32,
    size: u32,
    serialize: F,
) -> Result<Page<T>, PageError>
where
    E: QueryExecutor,
    R: for<'r> FromRow<'r, E::Row>,
    F: FnMut(R) -> T,
{
    let args = PageArgs::new(page, size)?;

    let total_count = executor.count(query).await?;
    let window = query.clone().limit(args.size()).offset(args.offset());
    let rows = executor.fetch_all(&window).await?;

    let items = rows
        .iter()
        .map(|row| R::from_row(row))
        .collect::<Result<Vec<R>, _>>()
        .map_err(DataError::Decode)?;

    tracing::debug!(
        table = %query.entity().table,
        page = args.page(),
        size = args.size(),
        total_count,
        fetched = items.len(),
        "Fetched page"
    );

    Ok(Page::new(items, total_count, &args).map(serialize))
}
