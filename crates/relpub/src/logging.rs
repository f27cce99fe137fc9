use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Log to the terminal, and additionally append to `log_file` when given.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> io::Result<()> {
    let level = level_for(verbose);
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("relpub")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(level, config, open_log_file(path)?));
    }

    // Only fails if a logger is already installed.
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::{LevelFilter, level_for, open_log_file};

    #[test]
    fn verbose_raises_level_to_debug() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[test]
    fn open_log_file_creates_parent_and_appends() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("logs").join("relpub.log");

        open_log_file(&log_path)
            .expect("first open creates file")
            .write_all(b"first\n")
            .expect("write succeeds");
        open_log_file(&log_path)
            .expect("second open reuses file")
            .write_all(b"second\n")
            .expect("write succeeds");

        let contents = std::fs::read_to_string(&log_path).expect("log file readable");
        assert_eq!(contents, "first\nsecond\n");
    }
}
