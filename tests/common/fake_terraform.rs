//! A shell script that answers like terraform.
//!
//! Every call is appended to `calls.log` as `<dir name> <subcommand>`, and
//! every var file it is handed is copied into `vars.log`. Behaviour is
//! steered by files in the state directory:
//!
//! - `outputs.json`: printed by `output -json`; `__PREFIX__` is replaced with
//!   the `name_prefix` from the last apply in that directory
//! - `apply_failures` + `apply_error`: fail that many applies with that text
//! - `destroy_fails`: every destroy exits non-zero
//! - `.invalid` inside a module directory: `validate` fails there

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Outputs a healthy Hrafnar deployment reports
pub const HEALTHY_OUTPUTS: &str = r#"{
  "hrafner_app_url": {"sensitive": false, "type": "string", "value": "https://__PREFIX__-app-xyz.a.run.app"},
  "vpc_name": {"sensitive": false, "type": "string", "value": "__PREFIX__-vpc"},
  "database_connection_name": {"sensitive": false, "type": "string", "value": "p1:us-central1:__PREFIX__-db"},
  "react_frontend_url": {"sensitive": false, "type": "string", "value": null}
}"#;

const SCRIPT: &str = r#"#!/bin/sh
STATE='@STATE@'
echo "$(basename "$PWD") $1" >> "$STATE/calls.log"
for arg in "$@"; do
  case "$arg" in
    -var-file=*)
      file="${arg#-var-file=}"
      cat "$file" >> "$STATE/vars.log"
      echo >> "$STATE/vars.log"
      sed -n 's/.*"name_prefix":"\([^"]*\)".*/\1/p' "$file" > "$PWD/.prefix"
      ;;
  esac
done
case "$1" in
  apply)
    if [ -f "$STATE/apply_failures" ]; then
      n=$(cat "$STATE/apply_failures")
      if [ "$n" -gt 0 ]; then
        echo $((n - 1)) > "$STATE/apply_failures"
        cat "$STATE/apply_error" >&2
        exit 1
      fi
    fi
    echo "Apply complete! Resources: 12 added, 0 changed, 0 destroyed."
    ;;
  output)
    prefix=$(cat "$PWD/.prefix" 2>/dev/null)
    sed "s/__PREFIX__/$prefix/g" "$STATE/outputs.json"
    ;;
  validate)
    if [ -f "$PWD/.invalid" ]; then
      echo "Error: Unsupported argument" >&2
      exit 1
    fi
    echo "Success! The configuration is valid."
    ;;
  destroy)
    if [ -f "$STATE/destroy_fails" ]; then
      echo "Error: deleting network: resourceInUseByAnotherResource" >&2
      exit 1
    fi
    ;;
esac
exit 0
"#;

/// Temp module root with `examples/dev` and `examples/prod`, plus the fake
/// binary that serves it
pub struct FakeTerraform {
    dir: TempDir,
}

impl FakeTerraform {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let fake = Self { dir };
        fs::create_dir_all(fake.module_root().join("examples/dev")).unwrap();
        fs::create_dir_all(fake.module_root().join("examples/prod")).unwrap();
        fs::create_dir_all(fake.state_dir()).unwrap();
        fake.write_script();
        fake.set_outputs(HEALTHY_OUTPUTS);
        fake
    }

    pub fn binary(&self) -> PathBuf {
        self.state_dir().join("terraform")
    }

    pub fn module_root(&self) -> PathBuf {
        self.dir.path().join("module")
    }

    fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    fn write_script(&self) {
        let state = self.state_dir();
        let script = SCRIPT.replace("@STATE@", &state.display().to_string());
        let path = self.binary();
        fs::write(&path, script).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    pub fn set_outputs(&self, json: &str) {
        fs::write(self.state_dir().join("outputs.json"), json).unwrap();
    }

    /// Make the next `count` applies fail with `diagnostics`
    pub fn fail_applies(&self, count: u32, diagnostics: &str) {
        fs::write(self.state_dir().join("apply_failures"), count.to_string()).unwrap();
        fs::write(self.state_dir().join("apply_error"), diagnostics).unwrap();
    }

    pub fn fail_destroys(&self) {
        fs::write(self.state_dir().join("destroy_fails"), "").unwrap();
    }

    /// Make `validate` fail in `dir` (relative to the module root)
    pub fn mark_invalid(&self, dir: &str) {
        fs::write(self.module_root().join(dir).join(".invalid"), "").unwrap();
    }

    /// `<dir name> <subcommand>` per call, in call order
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.state_dir().join("calls.log"))
    }

    /// Subcommands run in `dir_name`, in order
    pub fn calls_in(&self, dir_name: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|line| {
                line.strip_prefix(dir_name)
                    .and_then(|rest| rest.strip_prefix(' '))
                    .map(str::to_string)
            })
            .collect()
    }

    /// Var files passed to apply and destroy, parsed
    pub fn var_files(&self) -> Vec<serde_json::Value> {
        read_lines(&self.state_dir().join("vars.log"))
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("var file is JSON"))
            .collect()
    }

    /// Name of the module root directory, as it appears in `calls.log`
    pub fn root_name(&self) -> String {
        "module".to_string()
    }
}

impl Default for FakeTerraform {
    fn default() -> Self {
        Self::new()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
