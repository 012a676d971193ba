//! Suite runner.

use tracing::info;

use super::backend::SimulatedBackend;
use super::fixtures::TestSuite;
use super::HarnessError;

/// Totals from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Suites executed.
    pub suites: usize,
    /// Cases executed.
    pub cases: usize,
}

/// Run every case of every suite, stopping at the first failure.
pub fn run_suites(suites: &[TestSuite], backend: &SimulatedBackend) -> Result<RunSummary, HarnessError> {
    let mut summary = RunSummary::default();

    for suite in suites {
        match suite {
            TestSuite::Chain(test) => {
                info!(title = %test.title, summary = %test.summary, test_suite = %test.test_suite, "Chain test");
                for (i, case) in test.test_cases.iter().enumerate() {
                    backend
                        .run_chain_test(case)
                        .map_err(|e| e.in_case("chain", &test.title, i))?;
                    summary.cases += 1;
                }
            }
            TestSuite::Shuffle(test) => {
                info!(
                    title = %test.title,
                    summary = %test.summary,
                    test_suite = %test.test_suite,
                    fork = %test.fork,
                    version = %test.version,
                    "Shuffle test"
                );
                for (i, case) in test.test_cases.iter().enumerate() {
                    backend
                        .run_shuffle_test(case)
                        .map_err(|e| e.in_case("shuffle", &test.title, i))?;
                    summary.cases += 1;
                }
            }
        }
        summary.suites += 1;
    }

    Ok(summary)
}
