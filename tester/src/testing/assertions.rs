//! Check results and the end-of-run summary

use shared::{process_error, process_info, ComponentId};

/// Outcome of one named check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    pub name: String,
    pub success: bool,
    pub message: String,
}

impl AssertionResult {
    pub fn success(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            message: message.into(),
        }
    }

    pub fn from_bool(name: impl Into<String>, success: bool, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success,
            message: message.into(),
        }
    }

    /// Log as a PASS/FAIL line
    pub fn log(&self) {
        let component = ComponentId::current();
        if self.success {
            process_info!(component, "✅ PASS: {}", self.name);
        } else {
            process_error!(component, "❌ FAIL: {}", self.name);
        }
        if !self.message.is_empty() {
            process_info!(component, "   {}", self.message);
        }
    }
}

/// Accumulates check results for one scenario run
#[derive(Debug, Clone, Default)]
pub struct TestSummary {
    results: Vec<AssertionResult>,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep a result
    pub fn record(&mut self, result: AssertionResult) -> bool {
        result.log();
        let success = result.success;
        self.results.push(result);
        success
    }

    pub fn results(&self) -> &[AssertionResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Percentage of passed checks; 0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Log the totals and every failed check
    pub fn print(&self) {
        let component = ComponentId::current();
        process_info!(component, "📊 Test Summary");
        process_info!(component, "Total Tests: {}", self.total());
        process_info!(component, "Passed: {}", self.passed());
        process_info!(component, "Failed: {}", self.failed());
        process_info!(component, "Success Rate: {:.1}%", self.success_rate());

        if self.failed() > 0 {
            process_error!(component, "❌ Failed Tests:");
            for failure in self.failures() {
                process_error!(component, "  - {}: {}", failure.name, failure.message);
            }
        }
    }
}
