// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod roster;
