use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        let path = Config::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            println!("{content}");
        } else {
            info(format!(
                "No config file at {} (defaults in effect).",
                path.display()
            ));
        }
        return Ok(());
    }

    if *check {
        if cfg.database.is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        if cfg.store_passphrase.is_empty() {
            info("Store gate is open (no passphrase configured).");
        }
        success("Configuration OK.");
        return Ok(());
    }

    info("Nothing to do: pass --print or --check.");
    Ok(())
}
