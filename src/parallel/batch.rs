//! Many independent fit calculations at once. Each request gets its own ship graph and memo;
//! only the catalog is shared.

use rayon::prelude::*;
use tracing::debug;

use crate::config::EngineConfig;
use crate::data::catalog::Catalog;
use crate::dogma::engine::CalculationRequest;
use crate::dogma::model::Ship;
use crate::error::Result;
use crate::parallel::pool::WorkerPool;

/// Calculate every request on `pool`. Results keep the order of `requests`; one failing fit
/// does not affect the others. The outer error is only for a pool that could not be built.
pub fn calculate_batch<C: Catalog + Sync + ?Sized>(
    catalog: &C,
    requests: &[CalculationRequest],
    config: &EngineConfig,
    pool: &WorkerPool,
) -> Result<Vec<Result<Ship>>> {
    let run_one = |request: &CalculationRequest| request.calculate(catalog, config);

    let results: Vec<Result<Ship>> =
        pool.install(|| requests.par_iter().map(run_one).collect())?;

    debug!(
        requests = requests.len(),
        failed = results.iter().filter(|result| result.is_err()).count(),
        workers = pool.workers,
        "calculated batch"
    );
    Ok(results)
}

/// Sequential counterpart of [`calculate_batch`].
pub fn calculate_all<C: Catalog + ?Sized>(
    catalog: &C,
    requests: &[CalculationRequest],
    config: &EngineConfig,
) -> Vec<Result<Ship>> {
    requests
        .iter()
        .map(|request| request.calculate(catalog, config))
        .collect()
}
