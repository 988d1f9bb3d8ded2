//! Debugging-skills assessment service: candidates investigate simulated
//! production incidents from logs, submit a diagnosis, and receive an
//! LLM-scored shipping-readiness verdict. Companies assemble problem sets
//! and review cohort analytics over all attempts.

// Core domain
pub mod aggregate;
pub mod attempt;
pub mod problems;
pub mod profile;
pub mod scorecard;
pub mod submission;
pub mod telemetry;

// Persistence
pub mod assessment_store;
pub mod attempt_store;

// Scoring oracle
pub mod oracle;

// HTTP surface
pub mod api;
pub mod app_state;
pub mod web;

// Ambient
pub mod config_loader;
pub mod errors;
