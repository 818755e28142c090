use derive_more::derive::From;
use serde::Deserialize;

#[derive(Debug, From)]
pub enum ConfigError {
    #[from(ignore)]
    IOError(std::io::Error),

    #[from(ignore)]
    DeserializationFailed(toml::de::Error),

    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::DeserializationFailed(value)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}

impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Outcome codes at or below this value are failures; at least one code
/// above it must be drawable for a pizza to ever succeed.
pub const HIGHEST_FAILURE_CODE: u32 = 4;

/// `KitchenConfig` describes one working day of the pizzeria: how many orders
/// the kitchen takes, how long each pizza may take and how the outcome of each
/// pizza is drawn.
///
/// Every field has a default so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitchenConfig {
    /// How many orders are made before the kitchen runs out of work.
    pub orders: u32,

    /// Smallest number of time units a pizza takes, inclusive.
    pub min_delay: u64,

    /// Largest number of time units a pizza takes, inclusive.
    pub max_delay: u64,

    /// Length of one time unit in milliseconds.
    pub delay_unit_ms: u64,

    /// Outcome codes are drawn from `1..=max_outcome_code`.
    pub max_outcome_code: u32,

    /// Seed for reproducible days, entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            orders: 10,
            min_delay: 1,
            max_delay: 5,
            delay_unit_ms: 1000,
            max_outcome_code: 12,
            seed: None,
        }
    }
}

impl KitchenConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the delay range is inverted or
    /// when no outcome code could produce a successful pizza.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_delay > self.max_delay {
            return Err(ConfigError::Invalid(format!(
                "min_delay ({}) is larger than max_delay ({})",
                self.min_delay, self.max_delay
            )));
        }

        if self.max_outcome_code <= HIGHEST_FAILURE_CODE {
            return Err(ConfigError::Invalid(format!(
                "max_outcome_code ({}) leaves no code for a successful pizza",
                self.max_outcome_code
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn delay_unit(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.delay_unit_ms)
    }
}

impl std::str::FromStr for KitchenConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> ConfigResult<Self> {
        let config: KitchenConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// `value_from_path` returns the regular `toml::Value` object which implements the
/// `serde::DeserializeOwned` trait which allows you to directly manipulate the value object
/// instead of a defined type.
///
/// # Errors
///
/// Fails when the file can not be read or is not valid TOML.
pub fn value_from_path<V: Into<std::path::PathBuf>>(target: V) -> ConfigResult<toml::Value> {
    let config_content = std::fs::read_to_string(target.into())?;
    Ok(toml::from_str(&config_content)?)
}

/// Reads and validates a [`KitchenConfig`] from the TOML file at `target`.
///
/// # Errors
///
/// Fails when the file can not be read, is not a valid kitchen config
/// or does not pass [`KitchenConfig::validate`].
pub fn from_path<V>(target: V) -> ConfigResult<KitchenConfig>
where
    V: Into<std::path::PathBuf>,
{
    let target_path = target.into();
    if target_path.is_dir() {
        return Err(ConfigError::Invalid(format!(
            "{} is a directory, not a config file",
            target_path.display()
        )));
    }

    let config_content = std::fs::read_to_string(target_path)?;
    config_content.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let target = std::env::temp_dir().join(format!(
            "pizzeria_config_{}_{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&target, content).expect("should write scratch config");
        target
    }

    #[test]
    fn should_default_to_ten_orders_of_one_to_five_seconds() {
        let config = KitchenConfig::default();

        assert_eq!(config.orders, 10);
        assert_eq!((config.min_delay, config.max_delay), (1, 5));
        assert_eq!(config.delay_unit(), std::time::Duration::from_secs(1));
        assert_eq!(config.max_outcome_code, 12);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let config: KitchenConfig = "orders = 3\nseed = 42\n".parse().expect("should parse");

        assert_eq!(config.orders, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_delay, 5);
    }

    #[test]
    fn should_reject_inverted_delay_range() {
        let result = "min_delay = 6\nmax_delay = 2\n".parse::<KitchenConfig>();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn should_reject_outcome_range_without_success_codes() {
        let result = "max_outcome_code = 4\n".parse::<KitchenConfig>();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn should_reject_unknown_fields() {
        let result = "ovens = 2\n".parse::<KitchenConfig>();
        assert!(matches!(result, Err(ConfigError::DeserializationFailed(_))));
    }

    #[test]
    fn should_load_config_from_path() {
        let target = scratch_file("load", "orders = 4\ndelay_unit_ms = 0\n");

        let config = from_path(target.clone()).expect("should load config");
        assert_eq!(config.orders, 4);
        assert_eq!(config.delay_unit_ms, 0);

        let value = value_from_path(target.clone()).expect("should load raw value");
        assert_eq!(value.get("orders").and_then(toml::Value::as_integer), Some(4));

        std::fs::remove_file(target).expect("should clean up scratch config");
    }

    #[test]
    fn should_fail_on_missing_file() {
        let result = from_path("/definitely/not/here/kitchen.toml");
        assert!(matches!(result, Err(ConfigError::IOError(_))));
    }
}
