//! Application settings consumed by the directives.
//!
//! Settings are plain `KEY=value` strings, usually read from a `.env` file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};

/// Base URL of the application, without the port
pub const APP_URL: &str = "APP_URL";
/// Port appended to `APP_URL`
pub const APP_PORT: &str = "APP_PORT";
/// Whether inline error fragments show details
pub const APP_DEBUG: &str = "APP_DEBUG";
/// Sub-path `@assets` resolves against
pub const PUBLIC_PATH: &str = "PUBLIC_PATH";
/// Sub-path `@images` resolves against
pub const IMAGES_PATH: &str = "IMAGES_PATH";

const DEFAULT_URL: &str = "http://localhost";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_PUBLIC_PATH: &str = "src/view/public";
const DEFAULT_IMAGES_PATH: &str = "src/view/public/images";

/// Key/value settings store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// An empty config: every lookup falls back to its default
    pub fn new() -> Config {
        Config::default()
    }

    /// Loads a `.env` style file.
    ///
    /// Blank lines and lines starting with `#` are skipped, each other line is
    /// split at the first `=` and surrounding quotes are removed from the value.
    /// Lines without `=` are ignored.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|e| Error::io_error(path.display(), e))?;

        Ok(Config::parse(&input))
    }

    /// Builds a config from the current process environment
    pub fn from_env() -> Config {
        Config { values: std::env::vars().collect() }
    }

    /// Parses the content of a `.env` file
    pub fn parse(input: &str) -> Config {
        let mut values = HashMap::new();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            values.insert(key.trim().to_string(), value.to_string());
        }

        Config { values }
    }

    /// Returns the value of `key` or `default` if it isn't set
    pub fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values.get(key).map(String::as_str).unwrap_or(default)
    }

    /// Sets or replaces a value
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    /// Overrides the values of `self` with the ones in `other`
    pub fn merge(&mut self, other: Config) {
        self.values.extend(other.values);
    }

    /// `APP_URL:APP_PORT` without any trailing slash.
    ///
    /// The port is left out when `APP_PORT` is set to an empty string.
    pub fn base_url(&self) -> String {
        let url = self.get(APP_URL, DEFAULT_URL).trim_end_matches('/');
        let port = self.get(APP_PORT, DEFAULT_PORT);
        let base = if port.is_empty() { url.to_string() } else { format!("{}:{}", url, port) };

        base.trim_end_matches('/').to_string()
    }

    /// Sub-path of `@assets` URLs
    pub fn public_path(&self) -> &str {
        self.get(PUBLIC_PATH, DEFAULT_PUBLIC_PATH).trim_matches('/')
    }

    /// Sub-path of `@images` URLs
    pub fn images_path(&self) -> &str {
        self.get(IMAGES_PATH, DEFAULT_IMAGES_PATH).trim_matches('/')
    }

    /// Detailed error fragments are shown unless `APP_DEBUG` is `false`, `0`, `off` or `no`
    pub fn is_debug(&self) -> bool {
        !matches!(
            self.get(APP_DEBUG, "true").to_ascii_lowercase().as_str(),
            "false" | "0" | "off" | "no"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::io::Write;

    #[test]
    fn defaults_without_values() {
        let config = Config::new();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.public_path(), "src/view/public");
        assert_eq!(config.images_path(), "src/view/public/images");
        assert!(config.is_debug());
    }

    #[test]
    fn parse_env_format() {
        let config = Config::parse(
            "# app\nAPP_URL=\"http://example.com/\"\n\nAPP_PORT='9000'\nBROKEN\nAPP_DEBUG=false\nTOKEN=a=b\n",
        );
        assert_eq!(config.get(APP_URL, ""), "http://example.com/");
        assert_eq!(config.get(APP_PORT, ""), "9000");
        assert_eq!(config.get("TOKEN", ""), "a=b");
        assert_eq!(config.get("BROKEN", "missing"), "missing");
        assert_eq!(config.base_url(), "http://example.com:9000");
        assert!(!config.is_debug());
    }

    #[test]
    fn base_url_without_port() {
        let mut config = Config::new();
        config.set(APP_URL, "https://site.test/");
        config.set(APP_PORT, "");
        assert_eq!(config.base_url(), "https://site.test");
    }

    #[test]
    fn merge_overrides() {
        let mut config = Config::parse("APP_PORT=1\nAPP_URL=http://a");
        config.merge(Config::parse("APP_PORT=2"));
        assert_eq!(config.base_url(), "http://a:2");
    }

    #[test]
    fn load_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "APP_URL=http://x").unwrap();
        writeln!(file, "APP_PORT=8000").unwrap();
        let config = Config::from_env_file(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://x:8000");
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let err = Config::from_env_file("/definitely/not/here/.env").unwrap_err();
        match err.kind {
            ErrorKind::Io { ref path, kind } => {
                assert_eq!(path, "/definitely/not/here/.env");
                assert_eq!(kind, std::io::ErrorKind::NotFound);
            }
            ref kind => panic!("unexpected kind {:?}", kind),
        }
    }
}
