//! The npm binary, used for install scripts and registry lookups

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::DEFAULT_NPM_BIN;
use crate::error::{Result, lifecycle};

/// External package manager the installer delegates to
pub trait PackageManager: Sync {
    /// Run the module's install lifecycle inside `module_dir`.
    ///
    /// `module` is the `name@version` used in error messages.
    fn run_install(&self, module: &str, module_dir: &Path) -> Result<()>;

    /// Ask the registry for the tarball URL of `name@version`.
    ///
    /// `Ok(None)` when the registry has no answer.
    fn view_tarball(&self, name: &str, version: &str) -> Result<Option<String>>;
}

/// [`PackageManager`] that shells out to `npm`
#[derive(Debug, Clone)]
pub struct NpmCli {
    program: PathBuf,
}

impl Default for NpmCli {
    fn default() -> Self {
        Self::new(DEFAULT_NPM_BIN)
    }
}

impl NpmCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.program.display(), args.join(" "))
    }
}

impl PackageManager for NpmCli {
    fn run_install(&self, module: &str, module_dir: &Path) -> Result<()> {
        let args = ["run-script", "install", "--production"];
        tracing::info!("Running install script for {}", module);

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(module_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| lifecycle::command_failed(self.describe(&args), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(lifecycle::script_failed(module, status))
        }
    }

    fn view_tarball(&self, name: &str, version: &str) -> Result<Option<String>> {
        let spec = format!("{name}@{version}");
        let args = ["view", spec.as_str(), "dist.tarball"];

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| lifecycle::command_failed(self.describe(&args), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(lifecycle::command_failed(
                self.describe(&args),
                stderr.trim(),
            ));
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!url.is_empty()).then_some(url))
    }
}
