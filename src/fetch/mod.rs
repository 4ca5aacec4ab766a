use crate::error::Result;
use crate::range::Granularity;

pub mod chunk;

pub use chunk::fetch_all;

/// Hard per-request record ceiling enforced by the upstream source.
pub const MAX_BATCH_SIZE: u64 = 700;

/// One primitive request against a bar source: `count` records beginning
/// `offset` positions back from the most recent record, ordered oldest-first
/// within the returned batch.
#[derive(Clone, Debug)]
pub struct BarsRequest<'a> {
    pub granularity: Granularity,
    pub market: &'a str,
    pub code: &'a str,
    pub offset: u64,
    pub count: u64,
}

/// Primitive fetch capability bound to one upstream connection. The source
/// maps granularity and market mnemonics onto its native category and venue
/// codes; this crate never sees those encodings.
pub trait BarSource {
    type Record;

    fn fetch_bars(&mut self, request: &BarsRequest<'_>) -> Result<Vec<Self::Record>>;
}

/// Server address picked by a best-endpoint selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub port: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointKind {
    Future,
    Stock,
}

/// Collaborator that picks the healthiest upstream server for a source kind.
/// Measurement and validation happen outside this crate.
pub trait EndpointSelector {
    fn select(&self, kind: EndpointKind) -> Result<Endpoint>;
}
