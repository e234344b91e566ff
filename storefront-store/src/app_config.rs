use serde::Deserialize;
use std::env;
use std::path::Path;
use storefront_shared::{Grade, Member};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub discount: DiscountConfig,
    /// Members loaded into the repository at startup
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Which discount policy the composition root wires in
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fix,
    #[default]
    Rate,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscountConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default = "default_fixed_amount")]
    pub fixed_amount: u32,
    #[serde(default = "default_rate_percent")]
    pub rate_percent: u32,
    /// Grade that earns a discount
    #[serde(default = "default_grade")]
    pub grade: Grade,
}

fn default_fixed_amount() -> u32 { 1000 }

fn default_rate_percent() -> u32 { 10 }

fn default_grade() -> Grade { Grade::Vip }

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            fixed_amount: default_fixed_amount(),
            rate_percent: default_rate_percent(),
            grade: default_grade(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layer `default`, `{RUN_MODE}` and `local` files from `dir`, then
    /// `STOREFRONT_*` environment variables. Every file is optional.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .add_source(file("default"))
            .add_source(file(&run_mode))
            // not checked in
            .add_source(file("local"))
            // e.g. `STOREFRONT_DISCOUNT__POLICY=fix`
            .add_source(
                config::Environment::with_prefix("STOREFRONT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        tracing::debug!(policy = ?config.discount.policy, members = config.members.len(), "Loaded config");
        Ok(config)
    }

    /// Build from an inline TOML document
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.discount.rate_percent > 100 {
            return Err(config::ConfigError::Message(format!(
                "discount.rate_percent must be at most 100, got {}",
                self.discount.rate_percent
            )));
        }
        Ok(())
    }
}
