use cadence_core::CadenceError;
use futures::stream::{self, StreamExt};

/// Run fallible tasks with at most `limit` in flight and return their outputs
/// in input order.
///
/// Each task is tagged with its index and the order is re-imposed after
/// collection, so completion order never leaks into the result. The first
/// error aborts the batch; tasks still in flight are dropped.
pub async fn try_join_ordered<I, F, T>(tasks: I, limit: usize) -> Result<Vec<T>, CadenceError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = Result<T, CadenceError>>,
{
    let mut pending = stream::iter(
        tasks
            .into_iter()
            .enumerate()
            .map(|(i, fut)| async move { (i, fut.await) }),
    )
    .buffer_unordered(limit.max(1));

    let mut out: Vec<(usize, T)> = Vec::new();
    while let Some((i, res)) = pending.next().await {
        out.push((i, res?));
    }
    out.sort_by_key(|(i, _)| *i);
    Ok(out.into_iter().map(|(_, v)| v).collect())
}

/// Infallible counterpart of [`try_join_ordered`].
pub async fn join_ordered<I, F, T>(tasks: I, limit: usize) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    let mut out: Vec<(usize, T)> = stream::iter(
        tasks
            .into_iter()
            .enumerate()
            .map(|(i, fut)| async move { (i, fut.await) }),
    )
    .buffer_unordered(limit.max(1))
    .collect()
    .await;
    out.sort_by_key(|(i, _)| *i);
    out.into_iter().map(|(_, v)| v).collect()
}
