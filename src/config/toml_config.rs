use crate::config::ClientConfig;
use crate::utils::error::{ClientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout: everything lives under an optional `[client]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    client: ClientConfig,
}

impl ClientConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        tracing::debug!("Loaded config file: {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text, after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        let file: ConfigFile =
            toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(file.client)
    }
}

/// Replaces `${VAR}` with the environment value. Comments are left untouched.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| ClientError::ConfigError {
        message: format!("Regex error: {}", e),
    })?;

    let mut result = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let (code, comment) = line.split_at(comment_start(line));
        let mut last = 0;
        for caps in re.captures_iter(code) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value =
                std::env::var(name.as_str()).map_err(|_| ClientError::MissingConfigError {
                    field: format!("environment variable {}", name.as_str()),
                })?;
            result.push_str(&code[last..whole.start()]);
            result.push_str(&value);
            last = whole.end();
        }
        result.push_str(&code[last..]);
        result.push_str(comment);
    }

    Ok(result)
}

/// Byte offset of a `#` comment on this line, or the line length.
/// Tracks single-line basic and literal strings; a `#` inside them is text.
fn comment_start(line: &str) -> usize {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match (quote, c) {
            (Some('"'), _) if escaped => escaped = false,
            (Some('"'), '\\') => escaped = true,
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '#') => return i,
            (None, _) => {}
        }
    }
    line.len()
}
