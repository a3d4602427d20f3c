//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("# {}", path.display());
            println!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
            Ok(())
        }
    }
}

/// Write the default configuration to `path`.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        let args = ConfigArgs {
            action: ConfigAction::Init { force: false },
        };
        execute_config(args, &Config::default(), &path, &formatter).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ncolor = false\n").unwrap();

        assert!(matches!(init_config(&path, false), Err(CliError::InvalidInput(_))));
        init_config(&path, true).unwrap();
        assert!(Config::load_from(&path).unwrap().settings.color);
    }
}
