use std::path::PathBuf;

use clap::Parser;
use pp_utils::{ConfigError, PortalConfig};

#[derive(Debug, Parser)]
#[command(
    name = "pp-client",
    about = "Single-patient dashboard with a clickable 3D body model"
)]
pub struct Args {
    /// TOML file overriding the built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// glTF/GLB asset path, relative to the assets root.
    #[arg(long)]
    pub model: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn load_config(&self) -> Result<PortalConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PortalConfig::load(path)?,
            None => PortalConfig::default(),
        };
        if let Some(model) = &self.model {
            config.model.path = model.clone();
            config.validate()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = Args::try_parse_from(["pp-client"]).unwrap();
        assert!(!args.verbose);
        assert_eq!(args.load_config().unwrap(), PortalConfig::default());
    }

    #[test]
    fn model_flag_overrides_path() {
        let args = Args::try_parse_from(["pp-client", "--model", "models/skeleton.glb", "-v"])
            .unwrap();
        assert!(args.verbose);
        let config = args.load_config().unwrap();
        assert_eq!(config.model.path, "models/skeleton.glb");
        assert_eq!(config.model.target_height, 1.9);
    }

    #[test]
    fn empty_model_flag_is_rejected() {
        let args = Args::try_parse_from(["pp-client", "--model", ""]).unwrap();
        assert!(matches!(args.load_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unreadable_config_is_reported() {
        let args =
            Args::try_parse_from(["pp-client", "--config", "/nonexistent/portal.toml"]).unwrap();
        assert!(matches!(args.load_config(), Err(ConfigError::Io { .. })));
    }
}
