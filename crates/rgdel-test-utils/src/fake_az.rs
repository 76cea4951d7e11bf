//! Scripted stand-in for the `az` binary
//!
//! `FakeAz` writes a POSIX shell script into a temporary directory. The
//! script appends every invocation's arguments to a call log, then answers
//! with the first rule whose prefix matches the joined arguments. Unmatched
//! invocations print `[]` and exit 0, which reads as "nothing to do" for
//! every list call.
//!
//! The script is run as `sh <script> <args...>` rather than executed
//! directly, so tests never race on a freshly written executable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One canned response
#[derive(Debug, Clone)]
struct Rule {
    prefix: String,
    stdout: String,
    stderr: String,
    exit_code: i32,
    delay_secs: u64,
}

/// Builder for [`FakeAz`]
#[derive(Debug, Default)]
pub struct FakeAzBuilder {
    rules: Vec<Rule>,
}

impl FakeAzBuilder {
    /// Answer invocations starting with `prefix` with `stdout` and exit 0.
    pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
            delay_secs: 0,
        });
        self
    }

    /// Fail invocations starting with `prefix`, writing `stderr` and exiting 1.
    pub fn fail(mut self, prefix: &str, stderr: &str) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: 1,
            delay_secs: 0,
        });
        self
    }

    /// Sleep `delay_secs` before answering invocations starting with `prefix`.
    pub fn hang(mut self, prefix: &str, delay_secs: u64) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            stdout: "[]".to_string(),
            stderr: String::new(),
            exit_code: 0,
            delay_secs,
        });
        self
    }

    /// Write the script and response files.
    pub fn build(self) -> io::Result<FakeAz> {
        let dir = tempfile::tempdir()?;
        let log = dir.path().join("calls.log");
        fs::write(&log, "")?;

        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!("printf '%s\\n' \"$*\" >> {}\n", sh_quote(&log)));
        script.push_str("case \"$*\" in\n");

        for (i, rule) in self.rules.iter().enumerate() {
            let out = dir.path().join(format!("rule-{i}.out"));
            let err = dir.path().join(format!("rule-{i}.err"));
            fs::write(&out, &rule.stdout)?;
            fs::write(&err, &rule.stderr)?;

            script.push_str(&format!("  {}*)\n", sh_quote_str(&rule.prefix)));
            if rule.delay_secs > 0 {
                script.push_str(&format!("    sleep {}\n", rule.delay_secs));
            }
            script.push_str(&format!("    cat {}\n", sh_quote(&out)));
            script.push_str(&format!("    cat {} >&2\n", sh_quote(&err)));
            script.push_str(&format!("    exit {}\n", rule.exit_code));
            script.push_str("    ;;\n");
        }

        script.push_str("esac\n");
        script.push_str("echo '[]'\n");

        let script_path = dir.path().join("az.sh");
        fs::write(&script_path, script)?;

        Ok(FakeAz {
            _dir: dir,
            script: script_path,
            log,
        })
    }
}

/// A fake `az` living in a temporary directory
#[derive(Debug)]
pub struct FakeAz {
    _dir: TempDir,
    script: PathBuf,
    log: PathBuf,
}

impl FakeAz {
    /// Start building a fake with no rules.
    pub fn builder() -> FakeAzBuilder {
        FakeAzBuilder::default()
    }

    /// Program to run in place of `az`.
    pub fn program(&self) -> &str {
        "sh"
    }

    /// Arguments that must precede the `az` arguments.
    pub fn leading_args(&self) -> Vec<String> {
        vec![self.script.display().to_string()]
    }

    /// Every recorded invocation, one space-joined argument line each.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Recorded invocations starting with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Position of the first invocation starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.starts_with(prefix))
    }
}

fn sh_quote(path: &Path) -> String {
    sh_quote_str(&path.display().to_string())
}

fn sh_quote_str(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
