use std::{fs, fs::File, io::Write, path::Path};

use env_logger::{Builder, Env, Target, fmt::Formatter};
use log::{Level, Record};

use crate::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Environment variable that overrides `--log-level` with env_logger filter directives.
pub const LOG_ENV: &str = "TSP_BNB_LOG";

pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .parse_env(Env::new().filter(LOG_ENV))
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{}", render(log_format, record))
        })
        .target(log_target(options.log_output_path())?);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(path: Option<&Path>) -> Result<Target> {
    let Some(path) = path else {
        return Ok(Target::Stderr);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

fn render(format: LogFormat, record: &Record<'_>) -> String {
    match format {
        LogFormat::Compact => format!("{} {}", level_tag(record.level()), record.args()),
        LogFormat::Pretty => format!(
            "{:<5} [{}] {}",
            level_tag(record.level()),
            short_target(record.target()),
            record.args()
        ),
    }
}

/// `tsp_bnb_core::bnb::solver` -> `bnb::solver`
fn short_target(target: &str) -> &str {
    target
        .split_once("::")
        .map_or(target, |(_, rest)| rest)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
