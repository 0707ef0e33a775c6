//! Server configuration from environment variables.
//!
//! HOST, PORT, TOTAL_ROUNDS, FINISH_POLICY (`auto` | `manual`), PAIRING_SEED,
//! TOURNAMENT_NAME, TOURNAMENT_LOCATION. Unset or unparsable values use the defaults.

use crate::models::{FinishPolicy, TournamentSettings};
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Fixed seed for the pairing shuffle; entropy when `None`.
    pub pairing_seed: Option<u64>,
    /// Settings of the tournament created at startup.
    pub tournament: TournamentSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            pairing_seed: None,
            tournament: TournamentSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT") {
            config.port = port;
        }
        config.pairing_seed = parse_var(&lookup, "PAIRING_SEED");
        if let Some(rounds) = parse_var::<u32, _>(&lookup, "TOTAL_ROUNDS") {
            if rounds > 0 {
                config.tournament.total_rounds = rounds;
            } else {
                log::warn!("TOTAL_ROUNDS must be at least 1, keeping {}", config.tournament.total_rounds);
            }
        }
        if let Some(policy) = lookup("FINISH_POLICY") {
            match policy.trim().to_ascii_lowercase().as_str() {
                "auto" | "auto_at_limit" => config.tournament.finish_policy = FinishPolicy::AutoAtLimit,
                "manual" => config.tournament.finish_policy = FinishPolicy::Manual,
                other => log::warn!("Unknown FINISH_POLICY '{}', using auto", other),
            }
        }
        if let Some(name) = lookup("TOURNAMENT_NAME") {
            config.tournament.name = name;
        }
        if let Some(location) = lookup("TOURNAMENT_LOCATION") {
            config.tournament.location = location;
        }
        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring unparsable {}='{}'", key, raw);
            None
        }
    }
}
