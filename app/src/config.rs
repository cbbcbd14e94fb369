use crate::error::ConfigError;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    bind_host: IpAddr,
    server_port: u16,
    database_url: Option<String>,
    database_max_connections: u32,
}

impl Config {
    /// Reads the process environment, after merging a `.env` file if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => parse_var("SERVER_PORT", &raw)?,
            None => DEFAULT_PORT,
        };
        let bind_host = match lookup("BIND_HOST") {
            Some(raw) => parse_var("BIND_HOST", &raw)?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => parse_var("DATABASE_MAX_CONNECTIONS", &raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        Ok(Config {
            bind_host,
            server_port,
            database_url,
            database_max_connections,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.server_port)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(key, raw.to_owned()))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(8000, config.server_addr().port());
        assert!(config.server_addr().ip().is_unspecified());
        assert_eq!(None, config.database_url());
        assert_eq!(5, config.database_max_connections());
    }

    #[test]
    fn test_port_fallback() {
        let config = Config::from_lookup(lookup(&[("PORT", "9000")])).unwrap();
        assert_eq!(9000, config.server_addr().port());

        let config =
            Config::from_lookup(lookup(&[("PORT", "9000"), ("SERVER_PORT", "9001")])).unwrap();
        assert_eq!(9001, config.server_addr().port());
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("SERVER_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("BIND_HOST", "nowhere")])).is_err());
    }

    #[test]
    fn test_blank_database_url_selects_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(None, config.database_url());
    }
}
