use std::path::Path;

use cargo_cursor::{Cargo, CargoCommand, Cursor};
use cargo_cursor_core::{Error, Settings};
use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code when nothing can run at the cursor
const EXIT_NOTHING_TO_RUN: i32 = 2;

fn main() {
    let cursor = parse_args();
    init_tracing(&cursor);

    if let Err(err) = cursor.execute() {
        std::process::exit(report(&err));
    }
}

/// Accept both `cargo cursor ...` and `cargo-cursor ...`
fn parse_args() -> Cursor {
    let invoked_by_cargo = std::env::args().nth(1).is_some_and(|arg| arg == "cursor");
    if invoked_by_cargo {
        let CargoCommand::Cursor(cursor) = Cargo::parse().command;
        cursor
    } else {
        Cursor::parse()
    }
}

/// `RUST_LOG` wins; otherwise the `logLevel` of the settings nearest to the
/// file. Logs go to stderr so stdout only carries the command.
fn init_tracing(cursor: &Cursor) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = Settings::load_nearest(Path::new(cursor.filepath()), cursor.workspace.as_deref())
            .map(|settings| settings.log_level)
            .unwrap_or_default();
        EnvFilter::new(level.as_filter())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Log the error at the level its kind calls for, tell the user, and pick
/// the exit code
fn report(err: &anyhow::Error) -> i32 {
    let Some(core_error) = err.downcast_ref::<Error>() else {
        error!("{:#}", err);
        eprintln!("cargo-cursor error: {err:#}");
        return 1;
    };

    let level = core_error.log_level_hint();
    if level == Level::DEBUG {
        debug!("{}", core_error);
    } else if level == Level::INFO {
        info!("{}", core_error);
    } else {
        error!("{}", core_error);
    }
    eprintln!("{}", core_error.user_message());

    if core_error.is_recoverable() {
        EXIT_NOTHING_TO_RUN
    } else {
        1
    }
}
