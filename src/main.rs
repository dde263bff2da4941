// SPDX-License-Identifier: MPL-2.0
use oncocross::app::{self, config, paths, Flags};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "\
OncoCross Nutrition

USAGE:
  oncocross [OPTIONS]

OPTIONS:
  --lang <code>         UI language (en, ko, zh, ar)
  --server <url>        Analysis backend base URL
  --config-dir <dir>    Directory holding settings.toml
  --data-dir <dir>      Directory holding state.cbor
  --analysis <id>       Open a stored analysis on startup
  -h, --help            Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = Flags {
        lang: optional(&mut args, "--lang"),
        server: optional(&mut args, "--server"),
        config_dir: optional(&mut args, "--config-dir"),
        data_dir: optional(&mut args, "--data-dir"),
        analysis: optional(&mut args, "--analysis"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unrecognized arguments");
    }

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting OncoCross");
    app::run(flags)
}

/// Reads an optional `--key value` argument, logging and dropping bad values.
fn optional<T>(args: &mut pico_args::Arguments, key: &'static str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring invalid argument");
            None
        }
    }
}
