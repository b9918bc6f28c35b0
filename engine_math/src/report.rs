//! Check report generation.
//!
//! Collects named pass/fail results grouped by category and writes them as
//! pretty JSON or a plain-text summary.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Check result status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASS",
            TestStatus::Failed => "FAIL",
            TestStatus::Skipped => "SKIP",
        }
    }
}

/// A single check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Check ID (e.g., "RAY-001").
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: TestStatus,
    pub duration: Duration,
    /// Failure or skip reason.
    pub message: Option<String>,
}

impl TestResult {
    /// New results start out skipped until `pass` or `fail` is called.
    pub fn new(id: &str, name: &str, category: &str) -> Self {
        TestResult {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            status: TestStatus::Skipped,
            duration: Duration::ZERO,
            message: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn pass(mut self, duration: Duration) -> Self {
        self.status = TestStatus::Passed;
        self.duration = duration;
        self
    }

    pub fn fail(mut self, duration: Duration, error: &str) -> Self {
        self.status = TestStatus::Failed;
        self.duration = duration;
        self.message = Some(error.to_string());
        self
    }

    pub fn skip(mut self, reason: &str) -> Self {
        self.status = TestStatus::Skipped;
        self.message = Some(reason.to_string());
        self
    }

    /// Passes on `Ok`, fails with the error chain on `Err`.
    pub fn from_outcome(self, duration: Duration, outcome: anyhow::Result<()>) -> Self {
        match outcome {
            Ok(()) => self.pass(duration),
            Err(e) => self.fail(duration, &format!("{e:#}")),
        }
    }
}

/// Category summary statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total_duration: Duration,
}

impl CategoryStats {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }

    pub fn add_result(&mut self, result: &TestResult) {
        self.total += 1;
        self.total_duration += result.duration;
        match result.status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
    }
}

/// Full report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub title: String,
    pub subtitle: String,
    /// Unix seconds when the report was created.
    pub timestamp: u64,
    pub results: Vec<TestResult>,
    /// Free-form run parameters (seed, sample count, ...).
    pub metadata: BTreeMap<String, String>,
}

impl TestReport {
    pub fn new(title: &str, subtitle: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        TestReport {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            timestamp,
            results: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn add_result(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn overall_stats(&self) -> CategoryStats {
        let mut stats = CategoryStats::default();
        for result in &self.results {
            stats.add_result(result);
        }
        stats
    }

    /// Stats keyed by category, in name order.
    pub fn stats_by_category(&self) -> BTreeMap<String, CategoryStats> {
        let mut map: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for result in &self.results {
            map.entry(result.category.clone())
                .or_default()
                .add_result(result);
        }
        map
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results
            .iter()
            .filter(|r| r.status == TestStatus::Failed)
    }

    /// Skipped checks do not count against this.
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Plain-text summary: header, one line per category, then one line per check.
    pub fn to_text(&self) -> String {
        let stats = self.overall_stats();
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.title);
        if !self.subtitle.is_empty() {
            let _ = writeln!(out, "{}", self.subtitle);
        }
        for (key, value) in &self.metadata {
            let _ = writeln!(out, "  {key}: {value}");
        }
        let _ = writeln!(
            out,
            "\n{} checks: {} passed, {} failed, {} skipped ({:.1}%)\n",
            stats.total,
            stats.passed,
            stats.failed,
            stats.skipped,
            stats.pass_rate()
        );

        for (category, cat) in self.stats_by_category() {
            let _ = writeln!(out, "{category}: {}/{}", cat.passed, cat.total);
        }
        out.push('\n');

        for r in &self.results {
            let _ = write!(out, "[{}] {} {}", r.status.label(), r.id, r.name);
            if let Some(msg) = &r.message {
                let _ = write!(out, ": {msg}");
            }
            out.push('\n');
        }
        out
    }

    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize report")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))
    }

    pub fn save_text(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, self.to_text()).with_context(|| format!("write {}", path.display()))
    }
}

/// Builder for test reports.
pub struct ReportBuilder {
    report: TestReport,
}

impl ReportBuilder {
    pub fn new(title: &str) -> Self {
        ReportBuilder {
            report: TestReport::new(title, ""),
        }
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.report.subtitle = subtitle.to_string();
        self
    }

    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.report
            .metadata
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn add_test(mut self, result: TestResult) -> Self {
        self.report.add_result(result);
        self
    }

    /// In-place variant for loops.
    pub fn push(&mut self, result: TestResult) {
        self.report.add_result(result);
    }

    pub fn build(self) -> TestReport {
        self.report
    }
}
