use crate::engine::TimelineOffsets;
use std::collections::HashMap;
use thiserror::Error;

/// Largest accepted UTC offset, in minutes, for the market calendar.
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Minutes east of UTC used to derive the market's calendar day.
    pub market_utc_offset_minutes: i32,
    /// Fixed seed for every random draw; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    pub timeline: TimelineOffsets,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            market_utc_offset_minutes: 330,
            rng_seed: None,
            timeline: TimelineOffsets::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let market_utc_offset_minutes = env_map
            .get("MARKET_UTC_OFFSET_MINUTES")
            .map(|s| s.as_str())
            .unwrap_or("330")
            .parse::<i32>()
            .ok()
            .filter(|m| m.abs() <= MAX_OFFSET_MINUTES)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "MARKET_UTC_OFFSET_MINUTES".to_string(),
                    format!("must be an integer within ±{}", MAX_OFFSET_MINUTES),
                )
            })?;

        let rng_seed = match env_map.get("IPO_RNG_SEED") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "IPO_RNG_SEED".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?),
            None => None,
        };

        let timeline = TimelineOffsets {
            allotment_ms: parse_delay_ms(&env_map, "ALLOTMENT_DELAY_SECS", 60)?,
            listing_ms: parse_delay_ms(&env_map, "LISTING_DELAY_SECS", 120)?,
            close_ms: parse_delay_ms(&env_map, "CLOSE_DELAY_SECS", 240)?,
        };
        if !timeline.is_ordered() {
            return Err(ConfigError::InvalidValue(
                "CLOSE_DELAY_SECS".to_string(),
                "delays must satisfy allotment < listing < close".to_string(),
            ));
        }

        Ok(Config {
            port,
            market_utc_offset_minutes,
            rng_seed,
            timeline,
        })
    }
}

fn parse_delay_ms(
    env_map: &HashMap<String, String>,
    key: &str,
    default_secs: i64,
) -> Result<i64, ConfigError> {
    match env_map.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map(|secs| i64::from(secs) * 1_000)
            .map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "must be whole seconds".to_string())
            }),
        None => Ok(default_secs * 1_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.market_utc_offset_minutes, 330);
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.timeline, TimelineOffsets::default());
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_offset_out_of_range() {
        let mut env_map = HashMap::new();
        env_map.insert("MARKET_UTC_OFFSET_MINUTES".to_string(), "1440".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "MARKET_UTC_OFFSET_MINUTES"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_seed_parsed() {
        let mut env_map = HashMap::new();
        env_map.insert("IPO_RNG_SEED".to_string(), " 42 ".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_seed() {
        let mut env_map = HashMap::new();
        env_map.insert("IPO_RNG_SEED".to_string(), "-1".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "IPO_RNG_SEED"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_delays_must_be_ordered() {
        let mut env_map = HashMap::new();
        env_map.insert("LISTING_DELAY_SECS".to_string(), "30".to_string());
        assert!(matches!(
            Config::from_env_map(env_map),
            Err(ConfigError::InvalidValue(_, _))
        ));
    }

    #[test]
    fn test_custom_delays() {
        let mut env_map = HashMap::new();
        env_map.insert("ALLOTMENT_DELAY_SECS".to_string(), "10".to_string());
        env_map.insert("LISTING_DELAY_SECS".to_string(), "20".to_string());
        env_map.insert("CLOSE_DELAY_SECS".to_string(), "30".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.timeline.allotment_ms, 10_000);
        assert_eq!(config.timeline.listing_ms, 20_000);
        assert_eq!(config.timeline.close_ms, 30_000);
    }
}
