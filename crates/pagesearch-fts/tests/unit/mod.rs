mod error_coverage;
mod snapshot;
