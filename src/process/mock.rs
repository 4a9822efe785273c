//! Mock process runner for tests.

use std::cell::RefCell;

use super::{CapturedOutput, CommandSpec, CommandStatus, ProcessRunner};

/// A scripted response matched against a command line substring.
#[derive(Debug, Clone)]
struct Response {
    /// Substring matched against `CommandSpec::display()`.
    pattern: String,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

/// Scripted process runner for stage unit tests.
///
/// Responses are matched by substring against the rendered command line, in
/// registration order. Unmatched commands succeed with empty output by
/// default; [`MockRunner::failing_by_default`] flips that so anything
/// unscripted exits 1. Every executed command line is recorded for
/// assertions.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Vec<Response>,
    default_exit: Option<i32>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner where unscripted commands succeed.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            default_exit: Some(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Create a runner where unscripted commands fail with exit 1.
    pub fn failing_by_default() -> Self {
        Self {
            default_exit: Some(1),
            ..Self::new()
        }
    }

    /// Script an exit code for commands containing `pattern`.
    pub fn on(mut self, pattern: impl Into<String>, exit_code: i32) -> Self {
        self.responses.push(Response {
            pattern: pattern.into(),
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: String::new(),
        });
        self
    }

    /// Script an exit code and stdout text for commands containing `pattern`.
    pub fn on_output(
        mut self,
        pattern: impl Into<String>,
        exit_code: i32,
        stdout: impl Into<String>,
    ) -> Self {
        self.responses.push(Response {
            pattern: pattern.into(),
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: String::new(),
        });
        self
    }

    /// Command lines executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any executed command line contains `pattern`.
    pub fn saw(&self, pattern: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.contains(pattern))
    }

    fn lookup(&self, spec: &CommandSpec) -> (Option<i32>, String, String) {
        let line = spec.display();
        self.calls.borrow_mut().push(line.clone());

        for r in &self.responses {
            if line.contains(&r.pattern) {
                return (r.exit_code, r.stdout.clone(), r.stderr.clone());
            }
        }
        (self.default_exit, String::new(), String::new())
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> CommandStatus {
        let (code, _, _) = self.lookup(spec);
        CommandStatus::from_code(code)
    }

    fn run_captured(&self, spec: &CommandSpec) -> CapturedOutput {
        let (code, stdout, stderr) = self.lookup(spec);
        CapturedOutput {
            status: CommandStatus::from_code(code),
            stdout,
            stderr,
        }
    }
}
