use std::{
    convert::Infallible,
    ffi::OsStr,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Where log lines go. Anything other than `stdout`, `-` or `stderr` names a file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LogOutput {
    StdOut,
    #[default]
    StdErr,
    File(PathBuf),
}

impl FromStr for LogOutput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_ascii_lowercase().as_str() {
            "stdout" | "-" => Self::StdOut,
            "stderr" => Self::StdErr,
            _ => Self::File(PathBuf::from(s)),
        })
    }
}

/// Splits a log file path into the directory and file name the appender expects.
fn file_target(path: &Path) -> anyhow::Result<(&Path, &OsStr)> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid log file: {}", path.display()))?;
    Ok((directory, file_name))
}

pub fn config_tracing(format: LogFormat, log_to: &LogOutput) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match log_to {
        LogOutput::StdOut => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::StdErr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File(path) => {
            let (directory, file_name) = file_target(path)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };

    let layer = match format {
        LogFormat::Plain => fmt::layer().with_writer(writer).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from(Level::INFO))
        .with(layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_output_from_str() {
        assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::StdOut);
        assert_eq!("-".parse::<LogOutput>().unwrap(), LogOutput::StdOut);
        assert_eq!(" STDERR ".parse::<LogOutput>().unwrap(), LogOutput::StdErr);
        // File names keep their case.
        assert_eq!(
            "logs/Luck.log".parse::<LogOutput>().unwrap(),
            LogOutput::File(PathBuf::from("logs/Luck.log"))
        );
    }

    #[test]
    fn test_file_target() {
        let (dir, name) = file_target(Path::new("logs/luck.log")).unwrap();
        assert_eq!((dir, name), (Path::new("logs"), OsStr::new("luck.log")));

        let (dir, name) = file_target(Path::new("luck.log")).unwrap();
        assert_eq!((dir, name), (Path::new("."), OsStr::new("luck.log")));

        assert!(file_target(Path::new("/")).is_err());
    }
}
