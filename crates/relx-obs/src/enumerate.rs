//! Bounded concurrent binary enumeration.
//!
//! One task per selected package, at most `concurrency_limit` of them in a
//! lister call at any time. Successes and failures are published on two
//! unbounded channels; once the last task finishes both channels close and
//! the caller drains them. Any failure fails the whole enumeration.

use crate::lister::BinaryLister;
use crate::{AggregateError, ObsError, Result};
use futures::FutureExt;
use relx_core::FilteredPackages;
use relx_platform::OpContext;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

/// List binaries for every package in `packages`, bounded by
/// `concurrency_limit` simultaneous lookups.
///
/// Returns the concatenated binary lists in completion order. If any lookup
/// fails, every failure is returned together as
/// [`ObsError::Aggregate`] and no binaries are returned.
///
/// Dropping the returned future aborts all in-flight lookups.
///
/// # Errors
/// Returns [`ObsError::InvalidConcurrency`] for a limit of zero, or the
/// aggregated lookup failures.
pub async fn enumerate(
    ctx: &OpContext,
    project: &str,
    packages: &FilteredPackages,
    lister: Arc<dyn BinaryLister>,
    concurrency_limit: usize,
) -> Result<Vec<String>> {
    if concurrency_limit == 0 {
        return Err(ObsError::InvalidConcurrency);
    }
    if packages.is_empty() {
        debug!(%project, "no packages to enumerate");
        return Ok(Vec::new());
    }

    debug!(
        %project,
        packages = packages.len(),
        concurrency_limit,
        "enumerating binaries"
    );

    // More permits than tasks are never used, and tokio caps the count.
    let permits = concurrency_limit
        .min(packages.len())
        .min(Semaphore::MAX_PERMITS);
    let semaphore = Arc::new(Semaphore::new(permits));
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Vec<String>>();
    let (error_tx, mut error_rx) = mpsc::unbounded_channel::<ObsError>();
    let mut tasks = JoinSet::new();

    for (package, repository) in packages {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|_| ObsError::Backend("lookup semaphore closed".to_string()))?;

        let lister = Arc::clone(&lister);
        let ctx = ctx.clone();
        let project = project.to_string();
        let package = package.clone();
        let repository = repository.clone();
        let result_tx = result_tx.clone();
        let error_tx = error_tx.clone();

        tasks.spawn(async move {
            let _permit = permit;
            let lookup = lister.list_binaries(&ctx, &project, &package, &repository);

            match AssertUnwindSafe(lookup).catch_unwind().await {
                Ok(Ok(binaries)) => {
                    trace!(%package, count = binaries.len(), "binaries received");
                    let _ = result_tx.send(binaries);
                }
                Ok(Err(e)) => {
                    debug!(%package, error = %e, "binary lookup failed");
                    let _ = error_tx.send(ObsError::list_binaries(package, e));
                }
                Err(_) => {
                    warn!(%package, "binary lookup panicked");
                    let _ = error_tx.send(ObsError::TaskPanicked { package });
                }
            }
        });
    }

    // Tasks hold the remaining senders; the channels close when the last one
    // finishes.
    drop(result_tx);
    drop(error_tx);

    let mut errors = Vec::new();
    while let Some(err) = error_rx.recv().await {
        errors.push(err);
    }

    let mut binaries = Vec::new();
    while let Some(batch) = result_rx.recv().await {
        binaries.extend(batch);
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "binary lookup task did not complete");
        }
    }

    if !errors.is_empty() {
        warn!(%project, failed = errors.len(), "binary enumeration failed");
        return Err(AggregateError::new(errors).into());
    }

    debug!(%project, binaries = binaries.len(), "enumeration complete");
    Ok(binaries)
}
