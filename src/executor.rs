//! Invocation of the external ninja executor.

use crate::error::{GenError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// One `ninja` run against a generated build directory.
#[derive(Debug, Clone)]
pub struct NinjaInvocation {
    pub program: String,
    pub build_dir: PathBuf,
    pub targets: Vec<String>,
    pub verbose: bool,
}

impl NinjaInvocation {
    pub fn new(build_dir: impl Into<PathBuf>, targets: Vec<String>) -> Self {
        Self {
            program: "ninja".to_string(),
            build_dir: build_dir.into(),
            targets,
            verbose: false,
        }
    }

    /// Arguments after the program name.
    ///
    /// Duplicate outputs are made fatal so two edges can never silently
    /// compete for the same file.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-C".to_string(),
            self.build_dir.to_string_lossy().to_string(),
            "-w".to_string(),
            "dupbuild=err".to_string(),
        ];
        if self.verbose {
            args.push("-v".to_string());
        }
        args.extend(self.targets.iter().cloned());
        args
    }

    /// Run ninja with inherited stdio so its progress and diagnostics reach
    /// the terminal unmodified.
    pub fn run(&self) -> Result<()> {
        let args = self.args();
        debug!("Running: {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| GenError::io(Path::new(&self.program), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(GenError::ExternalTool {
                program: self.program.clone(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let mut inv = NinjaInvocation::new("out", vec!["gn".into(), "gn_unittests".into()]);
        assert_eq!(inv.args(), vec!["-C", "out", "-w", "dupbuild=err", "gn", "gn_unittests"]);

        inv.verbose = true;
        assert_eq!(inv.args()[4], "-v");
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let mut inv = NinjaInvocation::new("out", Vec::new());
        inv.program = "bootninja-no-such-ninja-binary".into();
        assert!(matches!(inv.run(), Err(GenError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_external_tool_error() {
        let mut inv = NinjaInvocation::new(".", Vec::new());
        inv.program = "false".into();
        match inv.run() {
            Err(GenError::ExternalTool { program, status }) => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("expected ExternalTool error, got {:?}", other),
        }
    }
}
