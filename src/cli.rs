//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Renders the placeholder sneaker images for the Future Kicks site.
///
/// With no arguments, writes `sneaker1.jpg`..`sneaker3.jpg` to the current
/// directory.
#[derive(Parser, Debug)]
#[command(name = "kicks-setup", version, about)]
pub struct Cli {
    /// Directory the images are written to (defaults to the current directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The directory output filenames are resolved against.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let cli = Cli::parse_from(["kicks-setup"]);
        assert!(cli.out_dir.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "kicks-setup",
            "-o",
            "site/images",
            "--config",
            "kicks.toml",
            "-v",
        ]);
        assert_eq!(cli.output_dir(), PathBuf::from("site/images"));
        assert_eq!(cli.config.as_deref(), Some("kicks.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["kicks-setup", "extra"]).is_err());
    }
}
