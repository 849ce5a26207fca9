//! Active plugin listing.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Print active plugins, one per line, in load order.
pub fn run(runner: &CliRunner, keep_extension: bool) -> Result<(), CliError> {
    runner.log_startup("plugins");

    let plugins = runner.context().active_plugins(!keep_extension)?;
    for (index, plugin) in plugins.iter().enumerate() {
        println!("{:>4}  {}", index, plugin);
    }
    Ok(())
}
