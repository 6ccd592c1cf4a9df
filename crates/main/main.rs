use std::process::{ExitCode, Termination};

use anyhow::{anyhow, Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use uemacs_core::{get_args, get_config_path, get_log_filter, Config, Error, Uemacs};

/// Exit code when no usable Emacs installation was found.
const EXIT_NOT_INSTALLED: u8 = 3;

fn main() -> ExitCode {
    handle_final_result(main_inner())
}

/// Use a distinct exit code when Emacs is not installed, so that scripts can tell this apart
/// from a failed launch. Report the error chain in both cases.
fn handle_final_result(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ref e) => {
            let not_installed = matches!(
                e.root_cause().downcast_ref::<Error>(),
                Some(Error::NotInstalled)
            );

            if not_installed {
                eprintln!("Error: {e:?}");
                ExitCode::from(EXIT_NOT_INSTALLED)
            } else {
                result.report()
            }
        }
    }
}

fn main_inner() -> Result<()> {
    let args = get_args();
    let config_file = get_config_path().context("getting config file path")?;
    let config = Config::load(&config_file).context("loading config file")?;
    init_logging(&config)?;
    debug!("loaded config from {}", config_file.display());

    let uemacs = Uemacs::new(args, config);
    uemacs.run_action_from_arg().context("running action")
}

/// `$UEMACS_LOG` (or `$RUST_LOG`) takes precedence over `log_level` from the config file.
fn init_logging(config: &Config) -> Result<()> {
    let filter = get_log_filter().unwrap_or_else(|| config.log_level.clone());
    let filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("initializing logging")
}
