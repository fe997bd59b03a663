//! Two-stage batch harvesting
//!
//! The one pattern shared by the export flows: a paginated parent listing is
//! fanned out to resolve zero-or-one derived identifier per parent (stage 1),
//! and the resolved identifiers are fanned out again to fetch per-item
//! payloads (stage 2). Both stages issue every request eagerly, in input
//! order, and join all of them before the pipeline proceeds.
//!
//! Failure policy: *aggregate fail-fast*. A stage collects per-item errors
//! and, if any request failed, surfaces a single [`Error::Batch`] carrying
//! the first error in input order. Payloads are buffered and handed to the
//! output sink only after both stages succeeded, so a failed batch records
//! zero side effects.
//!
//! [`Error::Batch`]: crate::error::Error::Batch

mod fanout;
mod flows;
mod report;

pub use fanout::{fan_out, select_latest};
pub use flows::{
    attach_note_file, download_map_exports, export_findings, export_geojson, FINDINGS_COLUMNS,
};
pub use report::HarvestReport;

use crate::error::Result;
use async_trait::async_trait;

/// Stage-1 contract: derive zero-or-one identifier from a parent item.
#[async_trait]
pub trait ItemResolver: Send + Sync {
    /// Parent item type (e.g. a farm)
    type Parent: Send + Sync;
    /// Derived identifier type (e.g. the latest inspection of the farm)
    type Resolved: Send + Sync;

    /// Resolve one parent; `None` marks a parent with nothing to fetch.
    async fn resolve(&self, parent: &Self::Parent) -> Result<Option<Self::Resolved>>;
}

/// Stage-2 contract: fetch the payload for one resolved identifier.
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    /// Resolved identifier type, matching the resolver's output
    type Input: Send + Sync;
    /// Fetched payload type
    type Payload: Send;

    /// Fetch one payload.
    async fn fetch(&self, input: &Self::Input) -> Result<Self::Payload>;
}

/// Outcome of a pipeline run, before the sink writes anything
#[derive(Debug)]
pub struct PipelineRun<P> {
    /// Fetched payloads, in resolver input order
    pub payloads: Vec<P>,
    /// Number of parents the pipeline started from
    pub parents: usize,
    /// Number of parents that resolved to an identifier
    pub resolved: usize,
    /// Number of parents that resolved to nothing
    pub skipped: usize,
}

/// The two-stage resolve-then-fetch pipeline
pub struct Pipeline<R, F> {
    resolver: R,
    fetcher: F,
}

impl<R, F> Pipeline<R, F>
where
    R: ItemResolver,
    F: ItemFetcher<Input = R::Resolved>,
{
    /// Combine a resolver and a fetcher into a pipeline
    pub fn new(resolver: R, fetcher: F) -> Self {
        Self { resolver, fetcher }
    }

    /// Run both stages over the given parents.
    ///
    /// Either stage failing aborts the whole run with an aggregate error;
    /// on success the payloads are returned in input order for the caller
    /// to persist.
    pub async fn run(&self, parents: &[R::Parent]) -> Result<PipelineRun<F::Payload>> {
        let outcomes = fan_out(parents, |parent| self.resolver.resolve(parent)).await?;

        let skipped = outcomes.iter().filter(|o| o.is_none()).count();
        let resolved: Vec<R::Resolved> = outcomes.into_iter().flatten().collect();

        let payloads = fan_out(&resolved, |item| self.fetcher.fetch(item)).await?;

        Ok(PipelineRun {
            payloads,
            parents: parents.len(),
            resolved: resolved.len(),
            skipped,
        })
    }
}

#[cfg(test)]
mod tests;
