//! Real engine backend driving the `ralsh` command-line front end.

use crate::backend::Backend;
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;
use std::process::Command;

/// Backend that executes real `ralsh` invocations.
///
/// The argv grammar follows ralsh: `--json` for machine-readable output,
/// then `[TYPE [NAME [ATTR=VALUE]...]]` positionals. The process exit
/// status is the engine's status channel; zero is success and any other
/// value surfaces verbatim as [`Error::Engine`].
pub struct RalshBackend {
    /// Path to the ralsh executable
    ralsh_path: String,
}

impl RalshBackend {
    /// Create a new `RalshBackend`.
    ///
    /// Returns an error if no ralsh executable can be found.
    pub fn new() -> Result<Self> {
        let ralsh_path = find_ralsh()?;
        Ok(Self { ralsh_path })
    }

    /// Create a backend for a known ralsh binary (nonstandard installs,
    /// tests).
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            ralsh_path: path.into(),
        }
    }

    /// Run a ralsh command and return output.
    fn run_ralsh(&self, args: &[&str]) -> Result<std::process::Output> {
        debug!("ralsh {}", args.join(" "));
        Command::new(&self.ralsh_path)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute ralsh: {e}"),
                stderr: String::new(),
            })
    }

    /// Run a ralsh command and check for success.
    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run_ralsh(args)?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            debug!("ralsh exited with status {code}");
            return Err(Error::Engine { code });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Backend for RalshBackend {
    fn is_available(&self) -> bool {
        self.run_ralsh(&["--version"])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn providers(&self) -> Result<String> {
        self.run_checked(&["--json"])
    }

    fn resources(&self, resource_type: &str) -> Result<String> {
        self.run_checked(&["--json", resource_type])
    }

    fn resource(&self, resource_type: &str, resource_name: &str) -> Result<String> {
        self.run_checked(&["--json", resource_type, resource_name])
    }

    fn apply(
        &self,
        resource_type: &str,
        resource_name: &str,
        desired: &HashMap<String, String>,
    ) -> Result<String> {
        // the engine transport wants one key=value per attribute; sorted
        // so the argv is stable regardless of map iteration order
        let mut args: Vec<String> = vec![
            "--json".to_string(),
            resource_type.to_string(),
            resource_name.to_string(),
        ];
        let mut pairs: Vec<String> = desired.iter().map(|(k, v)| format!("{k}={v}")).collect();
        pairs.sort();
        args.extend(pairs);

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_checked(&arg_refs)
    }
}

/// Find the ralsh executable path.
fn find_ralsh() -> Result<String> {
    // Check common locations
    let paths = [
        "/opt/puppetlabs/puppet/bin/ralsh",
        "/usr/local/bin/ralsh",
        "/usr/bin/ralsh",
    ];

    for path in &paths {
        if std::path::Path::new(path).exists() {
            return Ok((*path).to_string());
        }
    }

    // Try which
    let output = Command::new("which")
        .arg("ralsh")
        .output()
        .map_err(|_| Error::EngineNotFound)?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(path);
        }
    }

    Err(Error::EngineNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn stub_engine(script: &str) -> (tempfile::TempDir, RalshBackend) {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ralsh");
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();

        let backend = RalshBackend::with_path(path.to_str().unwrap());
        (dir, backend)
    }

    #[cfg(unix)]
    #[test]
    fn test_payload_passes_through_verbatim() {
        let (_dir, backend) = stub_engine("#!/bin/sh\nprintf '{\"resources\":[]}'\n");
        assert_eq!(backend.resources("host").unwrap(), r#"{"resources":[]}"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_surfaces_engine_code() {
        let (_dir, backend) = stub_engine("#!/bin/sh\nexit 12\n");
        match backend.resource("bogus", "x") {
            Err(Error::Engine { code }) => assert_eq!(code, 12),
            other => panic!("expected Engine error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_apply_encodes_desired_as_key_value_args() {
        let (_dir, backend) = stub_engine("#!/bin/sh\nprintf '%s' \"$*\"\n");

        let mut desired = HashMap::new();
        desired.insert("ensure".to_string(), "present".to_string());
        desired.insert("ip".to_string(), "127.0.0.1".to_string());

        let echoed = backend.apply("host", "localhost", &desired).unwrap();
        assert_eq!(echoed, "--json host localhost ensure=present ip=127.0.0.1");
    }

    #[cfg(unix)]
    #[test]
    fn test_is_available_on_stub() {
        let (_dir, backend) = stub_engine("#!/bin/sh\nexit 0\n");
        assert!(backend.is_available());

        let missing = RalshBackend::with_path("/nonexistent/ralsh");
        assert!(!missing.is_available());
    }

    #[test]
    fn test_missing_binary_is_command_failed() {
        let backend = RalshBackend::with_path("/nonexistent/ralsh");
        assert!(matches!(
            backend.providers(),
            Err(Error::CommandFailed { .. })
        ));
    }
}
