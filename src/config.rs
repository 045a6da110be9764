// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_API_KEY: &str = "finance-assistant-api-key-123";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Which authentication provider the session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Mock,
    Remote,
}

impl std::str::FromStr for AuthMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(AuthMode::Mock),
            "remote" => Ok(AuthMode::Remote),
            other => Err(anyhow!("Unknown auth mode '{}' (use mock|remote)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub auth_mode: AuthMode,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            auth_mode: AuthMode::Remote,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads the global flags; clap has already folded in env vars and defaults.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let mut cfg = Config::default();
        if let Some(url) = m.get_one::<String>("api-url") {
            cfg.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(key) = m.get_one::<String>("api-key") {
            cfg.api_key = key.clone();
        }
        if let Some(mode) = m.get_one::<String>("auth-mode") {
            cfg.auth_mode = mode.parse()?;
        }
        if let Some(secs) = m.get_one::<u64>("timeout") {
            cfg.timeout = Duration::from_secs(*secs);
        }
        Ok(cfg)
    }
}
