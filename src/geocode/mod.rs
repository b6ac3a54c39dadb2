use std::{
    future::Future,
    time::{Duration, Instant},
};

use futures_util::{StreamExt, future::join_all, stream};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Error, shared::geo::Coordinate};

mod config;
pub use config::*;

/// Turns free-text addresses into coordinates.
///
/// Implementations own their retry policy. The fan-out never retries a failed lookup.
pub trait Resolver {
    fn resolve(&self, address: &str) -> impl Future<Output = Result<Coordinate, Error>> + Send;
}

/// Outcome of resolving the address at `input_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub input_index: usize,
    pub coordinate: Option<Coordinate>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<Error>,
}

impl GeocodeResult {
    fn from_lookup(input_index: usize, lookup: Result<Coordinate, Error>) -> Self {
        match lookup {
            Ok(coordinate) => Self {
                input_index,
                coordinate: Some(coordinate),
                error: None,
            },
            Err(err) => Self {
                input_index,
                coordinate: None,
                error: Some(err),
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }
}

fn serialize_error<S: serde::Serializer>(error: &Option<Error>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => s.collect_str(error),
        None => s.serialize_none(),
    }
}

/// Resolves every address concurrently and waits for all of them.
///
/// The output has one entry per address, in input order.
pub async fn resolve_all<R, S>(addresses: &[S], resolver: &R) -> Vec<GeocodeResult>
where
    R: Resolver + Sync,
    S: AsRef<str>,
{
    resolve_all_with(addresses, resolver, &Config::default()).await
}

/// [`resolve_all`] with an in-flight cap and a deadline for the whole batch.
///
/// The timeout starts when the call starts. Any lookup still outstanding or still queued
/// behind the cap when it elapses is recorded as [`Error::ResolverTimeout`]; lookups that
/// settled before it keep their result.
pub async fn resolve_all_with<R, S>(
    addresses: &[S],
    resolver: &R,
    config: &Config,
) -> Vec<GeocodeResult>
where
    R: Resolver + Sync,
    S: AsRef<str>,
{
    debug!("Resolving {} addresses...", addresses.len());
    let now = Instant::now();
    let deadline = config
        .timeout
        .map(|limit| (tokio::time::Instant::now() + limit, limit));
    let lookups: Vec<_> = addresses
        .iter()
        .enumerate()
        .map(|(i, address)| lookup(i, address.as_ref(), resolver, deadline))
        .collect();

    let results: Vec<GeocodeResult> = match config.max_in_flight {
        Some(limit) => stream::iter(lookups).buffered(limit.max(1)).collect().await,
        None => join_all(lookups).await,
    };

    let failed = results.iter().filter(|result| !result.is_resolved()).count();
    debug!(
        "Resolving {} addresses ({} failed) took {:?}",
        results.len(),
        failed,
        now.elapsed()
    );
    results
}

async fn lookup<R: Resolver>(
    input_index: usize,
    address: &str,
    resolver: &R,
    deadline: Option<(tokio::time::Instant, Duration)>,
) -> GeocodeResult {
    let outcome = match deadline {
        // Queued past the deadline: never started.
        Some((deadline, limit)) if tokio::time::Instant::now() >= deadline => {
            Err(Error::ResolverTimeout(limit))
        }
        Some((deadline, limit)) => tokio::time::timeout_at(deadline, resolver.resolve(address))
            .await
            .unwrap_or(Err(Error::ResolverTimeout(limit))),
        None => resolver.resolve(address).await,
    };
    if let Err(err) = &outcome {
        warn!("Failed to resolve {address:?}: {err}");
    }
    GeocodeResult::from_lookup(input_index, outcome)
}
