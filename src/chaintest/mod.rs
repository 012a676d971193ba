//! Conformance harness.
//!
//! Loads YAML fixtures and checks the committee core against them:
//!
//! ```text
//! tests-dir → load_suites → [TestSuite] → run_suites → SimulatedBackend
//!                                                      ├─ run_chain_test   (genesis table)
//!                                                      └─ run_shuffle_test (shuffle vectors)
//! ```
//!
//! A failing case aborts the run; the error names the suite, the case and
//! the mismatched field.

pub mod fixtures;
pub mod backend;
pub mod runner;

pub use fixtures::{
    load_suites, ChainTest, ChainTestCase, ChainTestConfig, ChainTestResults, ShuffleTest,
    ShuffleTestCase, TestSuite,
};
pub use backend::SimulatedBackend;
pub use runner::{run_suites, RunSummary};

use crate::committees::CommitteeError;
use crate::config::ConfigError;
use crate::shuffle::ShuffleError;

/// Error type for the conformance harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Filesystem error.
    #[error("Could not read {path}: {source}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Fixture did not match the schema.
    #[error("Could not unmarshal YAML file {path} into test struct: {source}")]
    Yaml {
        /// Fixture path.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Case constants were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Committee computation failed.
    #[error(transparent)]
    Committee(#[from] CommitteeError),

    /// Shuffle failed.
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),

    /// Output differed from the fixture.
    #[error("{field} mismatch: expected {expected}, actual {actual}")]
    Mismatch {
        /// Field that differed.
        field: &'static str,
        /// Expected value.
        expected: String,
        /// Computed value.
        actual: String,
    },

    /// A case failed; wraps the cause with its location.
    #[error("{kind} test '{title}' case {case} failed: {source}")]
    CaseFailed {
        /// `chain` or `shuffle`.
        kind: &'static str,
        /// Suite title.
        title: String,
        /// Case index within the suite.
        case: usize,
        /// Underlying failure.
        #[source]
        source: Box<HarnessError>,
    },
}

impl HarnessError {
    /// Attach suite and case location.
    pub fn in_case(self, kind: &'static str, title: &str, case: usize) -> Self {
        Self::CaseFailed {
            kind,
            title: title.to_string(),
            case,
            source: Box::new(self),
        }
    }
}
