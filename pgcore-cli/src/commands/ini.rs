//! Effective INI settings.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Print the merged game INI, or a single value with `key`.
pub fn run(runner: &CliRunner, key: Option<&str>) -> Result<(), CliError> {
    runner.log_startup("ini");

    let config = runner.context().game_config()?;

    match key {
        Some(key) => {
            let value = config
                .get(key)
                .ok_or_else(|| CliError::KeyNotFound(key.to_string()))?;
            println!("{}", value);
        }
        None => {
            for (path, value) in config.flatten() {
                println!("{} = {}", path, value);
            }
        }
    }
    Ok(())
}
