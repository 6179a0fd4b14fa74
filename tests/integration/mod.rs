//! Library-level integration tests: scenarios and invariants of the
//! locate/extract/replace pipeline.

mod properties;
mod scenarios;
