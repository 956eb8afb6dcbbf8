use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, a TOML file, and
    /// `UPDOWN_`-prefixed environment variables (in increasing priority).
    ///
    /// A missing TOML file is tolerated; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or environment cannot be parsed into
    /// a valid `AppConfig`.
    pub fn load(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("UPDOWN_").split("__"))
            .extract()?;

        Ok(config)
    }
}
