//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["allar.toml", ".allar.toml"];
const ENV_PREFIX: &str = "ALLAR_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ALLAR_*` environment variables, e.g. `ALLAR_GEMINI__MODEL`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./allar.toml` or `./.allar.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/allar-ai/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// The merged sources, before extraction.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // An explicit path must exist; figment ignores missing files otherwise
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/allar-ai/config.toml if set,
    /// otherwise falls back to ~/.config/allar-ai/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("allar-ai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ env ] {}* variables", ENV_PREFIX);

        if let Some(path) = config_path {
            println!("  [FOUND] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./allar.toml or ./.allar.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
        assert!(config.console.show_spinner);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("allar-ai"));
    }

    #[test]
    fn test_project_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(
                "allar.toml",
                r#"
[gemini]
model = "gemini-2.5-flash"

[generation]
temperature = 1.2
"#,
            )?;
            jail.set_env("ALLAR_GENERATION__TEMPERATURE", "0.1");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.gemini.model, "gemini-2.5-flash");
            assert_eq!(config.generation.temperature, 0.1);
            assert_eq!(config.generation.max_output_tokens, 800);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_and_global() {
        Jail::expect_with(|jail| {
            let xdg = jail.directory().join("xdg");
            jail.set_env("XDG_CONFIG_HOME", xdg.display());
            std::fs::create_dir_all(xdg.join("allar-ai")).map_err(|e| e.to_string())?;
            std::fs::write(
                xdg.join("allar-ai").join("config.toml"),
                "[console]\ncolor = false\nshow_spinner = false\n",
            )
            .map_err(|e| e.to_string())?;
            jail.create_file(".allar.toml", "[console]\nshow_spinner = true\n")?;
            jail.create_file("custom.toml", "[logging]\ntranscript = \"t.jsonl\"\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert!(!config.console.color);
            assert!(config.console.show_spinner);
            assert_eq!(config.logging.transcript.as_deref(), Some("t.jsonl"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            assert!(ConfigLoader::load(Some(Path::new("nope.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            jail.create_file("allar.toml", "[generation]\nmax_output_tokens = \"many\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
