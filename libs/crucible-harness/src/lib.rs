//! Polyglot code-execution and grading harness.
//!
//! Everything between "raw submitted code + test cases" and "uniform list of
//! `{input, expected, actual, passed, error}`":
//!
//! - `generator` — per-language harness generators (pure text emitters)
//! - `engine` — execution backends (in-process evaluator, remote sandbox)
//! - `evaluator` — raw-output parsing and the pass/fail equality rule
//! - `executor` — the orchestrator tying the pipeline together
//! - `config` — per-language sandbox profiles (versions, file names)

pub mod config;
pub mod engine;
pub mod evaluator;
pub mod executor;
pub mod generator;

pub use executor::Orchestrator;

#[cfg(test)]
mod executor_tests;
