//! Shared mock `CommandRunner` for integration tests.
//!
//! Expectations are scripted per test: the first expectation whose program
//! matches and whose argument pattern is contained in the joined argument
//! list is consumed. `--version` dependency checks succeed implicitly so
//! every test does not have to script them. When an expectation asks for
//! it, the file following `-o` in the argument list is created, simulating
//! the tool writing its output.

use mkvshrink_core::{CommandOutput, CommandRunner, CoreResult};
use std::cell::RefCell;

pub struct Expectation {
    pub program: String,
    pub arg_pattern: String,
    pub output: CommandOutput,
    pub create_output_file: bool,
}

#[derive(Default)]
pub struct MockCommandRunner {
    expectations: RefCell<Vec<Expectation>>,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(
        &self,
        program: &str,
        arg_pattern: &str,
        status: i32,
        stdout: &str,
        stderr: &str,
        create_output_file: bool,
    ) {
        self.expectations.borrow_mut().push(Expectation {
            program: program.to_string(),
            arg_pattern: arg_pattern.to_string(),
            output: CommandOutput {
                status,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            create_output_file,
        });
    }

    /// Every call received, including dependency version checks.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }

    /// Calls excluding the `--version` dependency checks.
    pub fn tool_calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter(|(_, args)| !(args.len() == 1 && args[0] == "--version"))
            .collect()
    }

    pub fn tool_calls_for(&self, program: &str) -> Vec<Vec<String>> {
        self.tool_calls()
            .into_iter()
            .filter(|(p, _)| p == program)
            .map(|(_, args)| args)
            .collect()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));

        if args.len() == 1 && args[0] == "--version" {
            return Ok(CommandOutput {
                status: 0,
                stdout: format!("{program} mock 0.0.0"),
                stderr: String::new(),
            });
        }

        let joined = args.join(" ");
        let mut expectations = self.expectations.borrow_mut();
        let index = expectations
            .iter()
            .position(|exp| exp.program == program && joined.contains(&exp.arg_pattern))
            .unwrap_or_else(|| {
                panic!("MockCommandRunner: no expectation for: {program} {joined}")
            });
        let expectation = expectations.remove(index);

        if expectation.create_output_file {
            if let Some(pos) = args.iter().position(|a| a == "-o") {
                if let Some(path) = args.get(pos + 1) {
                    std::fs::write(path, b"mock tool output")
                        .expect("failed to create mock output file");
                }
            }
        }

        Ok(expectation.output)
    }
}
