use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Soft operational knobs. None of these affect protocol semantics (§9:
/// "deployment policy, pick one") — they're read from an optional TOML file
/// and fall back to hard-coded defaults so the binary runs unconfigured.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_motd")]
    pub motd: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            version: default_version(),
            motd: default_motd(),
        }
    }
}

fn default_version() -> String {
    "slrcd-1.0".to_string()
}

fn default_motd() -> String {
    "       _          \n  ___ | |_ __ ___ \n / __|| | '__/ __|\n \\__ \\| | | | (__ \n |___/|_|_|  \\___|\n\nWelcome to the server.".to_string()
}

impl Config {
    /// Loads and parses the TOML configuration file, if present; returns
    /// defaults when `path` does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// §6.3: reads `/etc/hostname` (one line, trailing LF stripped); falls back
/// to `localhost` when unavailable.
pub fn lookup_hostname() -> String {
    match fs::read_to_string("/etc/hostname") {
        Ok(contents) => {
            let trimmed = contents.trim_end_matches('\n').trim_end_matches('\r');
            if trimmed.is_empty() {
                "localhost".to_string()
            } else {
                trimmed.to_string()
            }
        }
        Err(_) => "localhost".to_string(),
    }
}
