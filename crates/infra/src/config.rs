//! Process configuration from environment variables.

use std::net::{IpAddr, SocketAddr};

use anyhow::{bail, Context, Result};
use rosterdesk_auth::DeletePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Load the demo profiles and users at startup.
    pub seed_demo_data: bool,
    pub delete_policy: DeletePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3001,
            seed_demo_data: true,
            delete_policy: DeletePolicy::RejectInactive,
        }
    }
}

impl AppConfig {
    /// Read `HOST`, `PORT`, `SEED_DEMO_DATA` and `ALLOW_DELETE_INACTIVE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match var("HOST") {
            Some(v) => v
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("invalid HOST: {v}"))?,
            None => defaults.host,
        };
        let port = match var("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT: {v}"))?,
            None => defaults.port,
        };
        let seed_demo_data = match var("SEED_DEMO_DATA") {
            Some(v) => parse_flag("SEED_DEMO_DATA", &v)?,
            None => defaults.seed_demo_data,
        };
        let delete_policy = match var("ALLOW_DELETE_INACTIVE") {
            Some(v) => match parse_flag("ALLOW_DELETE_INACTIVE", &v)? {
                true => DeletePolicy::AllowInactive,
                false => DeletePolicy::RejectInactive,
            },
            None => defaults.delete_policy,
        };

        Ok(Self {
            host,
            port,
            seed_demo_data,
            delete_policy,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid {key}: expected a boolean, got '{other}'"),
    }
}
