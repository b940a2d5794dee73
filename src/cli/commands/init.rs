use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

/// Handle the `init` command
///
/// Writes a default configuration file (never overwriting an existing one)
/// and tells the user which settings still need a value.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom = cli.config.as_deref().map(expand_tilde);
    let path = Config::init_all(custom.as_deref(), cli.test)?;

    if cli.test {
        info(format!("Test mode: configuration not written ({})", path.display()));
        return Ok(());
    }

    success(format!("Config file: {}", path.display()));
    info("Fill in api_key and employee_id, then run `rclocktray config --check`.");
    Ok(())
}
