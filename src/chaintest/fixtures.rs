//! YAML fixture schema and loader.
//!
//! ## Layout
//!
//! ```text
//! <tests-dir>/
//!   chain-tests/*.yaml     → ChainTest
//!   shuffle-tests/*.yaml   → ShuffleTest
//! ```
//!
//! Directories with other names are skipped. Files within a directory are
//! loaded in file-name order so runs are reproducible.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::HarnessError;
use crate::types::ValidatorIndex;

/// Directory holding chain fixtures.
pub const CHAIN_TESTS_DIR: &str = "chain-tests";

/// Directory holding shuffle fixtures.
pub const SHUFFLE_TESTS_DIR: &str = "shuffle-tests";

/// A suite of chain tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTest {
    /// Suite title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub summary: String,
    /// Suite name.
    pub test_suite: String,
    /// Cases to run.
    pub test_cases: Vec<ChainTestCase>,
}

/// Genesis committee check under one set of constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTestCase {
    /// Registry and constants for the case.
    pub config: ChainTestConfig,
    /// Expected outcome.
    pub results: ChainTestResults,
}

/// Chain test inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTestConfig {
    /// Number of active validators in the registry.
    pub validator_count: usize,
    /// Slots per cycle.
    pub cycle_length: u64,
    /// Total shards.
    pub shard_count: u64,
    /// Target committee size.
    pub target_committee_size: u64,
}

/// Chain test expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTestResults {
    /// Committees in every slot.
    pub committees_per_slot: u64,
    /// Length of the genesis table.
    pub slot_assignments: usize,
    /// Optional fingerprint of the genesis table.
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// A suite of shuffle conformance vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShuffleTest {
    /// Suite title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub summary: String,
    /// Suite name.
    pub test_suite: String,
    /// Fork the vectors target.
    pub fork: String,
    /// Vector format version.
    pub version: String,
    /// Cases to run.
    pub test_cases: Vec<ShuffleTestCase>,
}

/// One shuffle vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShuffleTestCase {
    /// Hex-encoded 32-byte seed.
    pub seed: String,
    /// Indices to shuffle.
    pub input: Vec<ValidatorIndex>,
    /// Expected permutation.
    pub output: Vec<ValidatorIndex>,
}

/// A loaded fixture file.
#[derive(Debug, Clone, PartialEq)]
pub enum TestSuite {
    /// From `chain-tests/`.
    Chain(ChainTest),
    /// From `shuffle-tests/`.
    Shuffle(ShuffleTest),
}

impl TestSuite {
    /// Suite title.
    pub fn title(&self) -> &str {
        match self {
            Self::Chain(t) => &t.title,
            Self::Shuffle(t) => &t.title,
        }
    }

    /// Number of cases in the suite.
    pub fn case_count(&self) -> usize {
        match self {
            Self::Chain(t) => t.test_cases.len(),
            Self::Shuffle(t) => t.test_cases.len(),
        }
    }
}

/// Load every fixture under `dir`.
pub fn load_suites(dir: &Path) -> Result<Vec<TestSuite>, HarnessError> {
    let mut suites = Vec::new();

    for sub in sorted_entries(dir)? {
        if !sub.is_dir() {
            continue;
        }
        let kind = sub.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if kind != CHAIN_TESTS_DIR && kind != SHUFFLE_TESTS_DIR {
            debug!(dir = %sub.display(), "Skipping unrecognised fixture directory");
            continue;
        }

        for file in sorted_entries(&sub)? {
            if !is_yaml(&file) {
                continue;
            }
            let data = std::fs::read_to_string(&file).map_err(|source| HarnessError::Io {
                path: file.display().to_string(),
                source,
            })?;
            let suite = if kind == CHAIN_TESTS_DIR {
                TestSuite::Chain(parse_yaml(&file, &data)?)
            } else {
                TestSuite::Shuffle(parse_yaml(&file, &data)?)
            };
            debug!(file = %file.display(), title = suite.title(), "Loaded fixture");
            suites.push(suite);
        }
    }

    Ok(suites)
}

fn parse_yaml<T: serde::de::DeserializeOwned>(path: &Path, data: &str) -> Result<T, HarnessError> {
    serde_yaml::from_str(data).map_err(|source| HarnessError::Yaml {
        path: path.display().to_string(),
        source,
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let read = std::fs::read_dir(dir).map_err(|source| HarnessError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| HarnessError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn is_yaml(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chain_fixture() {
        let yaml = r#"
title: Genesis committees
summary: Small registry
test_suite: genesis
test_cases:
  - config:
      validator_count: 16
      cycle_length: 4
      shard_count: 8
      target_committee_size: 2
    results:
      committees_per_slot: 2
      slot_assignments: 12
"#;
        let test: ChainTest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(test.test_cases.len(), 1);
        assert_eq!(test.test_cases[0].config.validator_count, 16);
        assert_eq!(test.test_cases[0].results.fingerprint, None);
    }

    #[test]
    fn test_parse_shuffle_fixture() {
        let yaml = r#"
title: Shuffle vectors
summary: Zero seed
test_suite: shuffle
fork: tchaikovsky
version: "1.0"
test_cases:
  - seed: "0x0000000000000000000000000000000000000000000000000000000000000000"
    input: [0, 1]
    output: [0, 1]
"#;
        let test: ShuffleTest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(test.fork, "tchaikovsky");
        assert_eq!(test.version, "1.0");
        assert_eq!(TestSuite::Shuffle(test).case_count(), 1);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let err = load_suites(Path::new("/nonexistent/fixtures")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }
}
