//! Perft suites: TOML-described positions with expected node counts, and the
//! JSON report produced by running them.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chess_core::{Position, perft};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Suite file layout:
///
/// ```toml
/// name = "standard"
///
/// [[case]]
/// name = "start"
/// fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
/// depths = [{ depth = 1, nodes = 20 }, { depth = 2, nodes = 400 }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    #[serde(default = "default_suite_name")]
    pub name: String,
    /// Depths above this are skipped unless overridden per run.
    #[serde(default)]
    pub max_depth: Option<u8>,
    #[serde(rename = "case", default)]
    pub cases: Vec<SuiteCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteCase {
    pub name: String,
    pub fen: String,
    pub depths: Vec<DepthExpectation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthExpectation {
    pub depth: u8,
    pub nodes: u64,
}

fn default_suite_name() -> String {
    "perft".to_string()
}

impl SuiteConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid suite TOML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read suite {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Outcome of one (case, depth) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthResult {
    pub case: String,
    pub depth: u8,
    pub expected: u64,
    pub actual: u64,
    pub passed: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub name: String,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_nodes: u64,
    pub results: Vec<DepthResult>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write report {}", path.display()))
    }
}

/// Run every case, comparing perft counts with the expectations.
///
/// A malformed FEN aborts the run; a count mismatch is recorded and the
/// suite carries on.
pub fn run_suite(config: &SuiteConfig) -> Result<SuiteReport> {
    let mut report = SuiteReport {
        name: config.name.clone(),
        passed: 0,
        failed: 0,
        skipped: 0,
        total_nodes: 0,
        results: Vec::new(),
    };

    for case in &config.cases {
        let pos = Position::from_fen(&case.fen)
            .with_context(|| format!("case '{}' has an invalid FEN", case.name))?;

        for exp in &case.depths {
            if config.max_depth.is_some_and(|max| exp.depth > max) {
                report.skipped += 1;
                continue;
            }

            let start = Instant::now();
            let actual = perft(&pos, exp.depth);
            let elapsed_ms = start.elapsed().as_millis() as u64;
            let passed = actual == exp.nodes;

            if passed {
                info!(case = %case.name, depth = exp.depth, nodes = actual, elapsed_ms, "ok");
                report.passed += 1;
            } else {
                warn!(
                    case = %case.name,
                    depth = exp.depth,
                    expected = exp.nodes,
                    actual,
                    "node count mismatch"
                );
                report.failed += 1;
            }
            report.total_nodes += actual;
            report.results.push(DepthResult {
                case: case.name.clone(),
                depth: exp.depth,
                expected: exp.nodes,
                actual,
                passed,
                elapsed_ms,
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod suite_tests;
