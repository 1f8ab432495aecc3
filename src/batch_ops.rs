//! src/batch_ops.rs
//! Parallel processing of independent input paths (feature `batch-ops`)

#[cfg(feature = "batch-ops")]
use rayon::prelude::*;
#[cfg(feature = "batch-ops")]
use std::path::Path;

#[cfg(feature = "batch-ops")]
use crate::orchestrator::{CollectingSink, Orchestrator, ResultSink, Summary};
#[cfg(feature = "batch-ops")]
use crate::{Algorithm, Options};

/// Like [`Orchestrator::run`], with input paths processed on the rayon pool.
///
/// Each path is buffered into its own [`CollectingSink`]; buffers are then
/// replayed into `sink` in input order, so output matches a sequential run.
#[cfg(feature = "batch-ops")]
pub fn decrypt_batch<P>(
    algorithm: &dyn Algorithm,
    options: &Options,
    paths: &[P],
    sink: &mut dyn ResultSink,
) -> Summary
where
    P: AsRef<Path> + Sync,
{
    let orchestrator = Orchestrator::new(algorithm, options);

    let buffered: Vec<(Summary, CollectingSink)> = paths
        .par_iter()
        .map(|path| {
            let mut local = CollectingSink::new();
            let summary = orchestrator.run_one(path.as_ref(), &mut local);
            (summary, local)
        })
        .collect();

    let mut total = Summary::default();
    for (summary, local) in buffered {
        total += summary;
        local.replay_into(sink);
    }
    total
}
