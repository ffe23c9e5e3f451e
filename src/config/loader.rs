//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::EnvSource;
use crate::error::{VerifyError, VerifyResult};

use super::types::Config;

/// Project config file name, looked up in the module root
pub const PROJECT_CONFIG_FILE: &str = "verify.toml";

pub const ENV_TERRAFORM_BIN: &str = "HRAFNAR_VERIFY_TERRAFORM_BIN";
pub const ENV_MAX_RETRIES: &str = "HRAFNAR_VERIFY_MAX_RETRIES";
pub const ENV_RETRY_DELAY: &str = "HRAFNAR_VERIFY_RETRY_DELAY";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| VerifyError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Which config file applies, in priority order:
/// 1. `explicit` (from `--config`)
/// 2. `<module_root>/verify.toml`
/// 3. `<user config dir>/hrafnar-verify/config.toml`
pub fn resolve_config_path(explicit: Option<&Path>, module_root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = module_root.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join("hrafnar-verify").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Load the applicable config file (or defaults), then apply environment
/// overrides.
///
/// An explicit path that does not exist is an error; a missing implicit
/// file just means defaults.
pub fn load(
    explicit: Option<&Path>,
    module_root: &Path,
    env: &dyn EnvSource,
) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match resolve_config_path(explicit, module_root) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };
    Ok((with_env_overrides(config, env), warnings))
}

/// Apply environment variable overrides (HRAFNAR_VERIFY_* prefix)
///
/// Unparseable values are logged and ignored.
pub fn with_env_overrides(mut config: Config, env: &dyn EnvSource) -> Config {
    if let Some(binary) = env.var(ENV_TERRAFORM_BIN).filter(|v| !v.trim().is_empty()) {
        config.tool.binary = Some(PathBuf::from(binary));
    }

    if let Some(raw) = env.var(ENV_MAX_RETRIES) {
        match raw.trim().parse::<u32>() {
            Ok(n) => config.retry.max_retries = n,
            Err(_) => tracing::warn!("ignoring {}={:?}: not a non-negative integer", ENV_MAX_RETRIES, raw),
        }
    }

    if let Some(raw) = env.var(ENV_RETRY_DELAY) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.retry.time_between_retries = secs,
            Err(_) => tracing::warn!("ignoring {}={:?}: not a number of seconds", ENV_RETRY_DELAY, raw),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "tool",
        "binary",
        "module_root",
        "retry",
        "max_retries",
        "time_between_retries",
        "patterns",
        "pattern",
        "reason",
        "scenarios",
        "enabled",
        "vars",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
