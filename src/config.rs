use std::{fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::anyhow;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub seed_path: Option<PathBuf>,
    /// How long the sign-in and register forms pretend to talk to a server.
    pub login_delay: Duration,
    /// How long the "It's a Match!" banner stays up after a trade.
    pub celebration: Duration,
    /// How long the settings page shows its "saved" notice.
    pub save_notice: Duration,
    pub session_idle: time::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_path: None,
            login_delay: Duration::from_millis(1000),
            celebration: Duration::from_millis(2000),
            save_notice: Duration::from_millis(3000),
            session_idle: time::Duration::minutes(30),
        }
    }
}

impl Config {
    /// Reads `SKILLSWAP_*` variables from the environment and `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            addr: parse(&lookup, "SKILLSWAP_ADDR")?.unwrap_or(defaults.addr),
            seed_path: lookup("SKILLSWAP_SEED").filter(|s| !s.is_empty()).map(PathBuf::from),
            login_delay: millis(&lookup, "SKILLSWAP_LOGIN_DELAY_MS")?.unwrap_or(defaults.login_delay),
            celebration: millis(&lookup, "SKILLSWAP_CELEBRATION_MS")?.unwrap_or(defaults.celebration),
            save_notice: millis(&lookup, "SKILLSWAP_SAVE_NOTICE_MS")?.unwrap_or(defaults.save_notice),
            session_idle: parse(&lookup, "SKILLSWAP_SESSION_IDLE_MIN")?
                .map(time::Duration::minutes)
                .unwrap_or(defaults.session_idle),
        })
    }
}

/// Longest delay or display window accepted: one day.
const MAX_MILLIS: u64 = 24 * 60 * 60 * 1000;

fn millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<Duration>> {
    match parse::<u64>(lookup, key)? {
        Some(ms) if ms > MAX_MILLIS => Err(anyhow!("invalid {key}={ms}: at most {MAX_MILLIS} ms")),
        ms => Ok(ms.map(Duration::from_millis)),
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| anyhow!("invalid {key}={value:?}: {err}")),
    }
}
