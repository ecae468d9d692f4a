// Resume-to-job match scoring engine.
// Pure, synchronous rule evaluation; the HTTP handlers are a thin adapter over `engine`.

pub mod aggregator;
pub mod comparator;
pub mod engine;
pub mod handlers;
pub mod job;
pub mod normalizer;
pub mod report;
pub mod signals;
pub mod skills;
pub mod taxonomy;
