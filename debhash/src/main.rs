//! debhash CLI
//!
//! Prints the filename and hash of a package from a `Packages` file, or the
//! hash of a package index from a `Release`/`InRelease` file. Nothing is
//! printed when no entry matches.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use debhash::{checksum::verify_file, Answer, HashType, MatchOptions, Query, Result};

#[derive(Parser)]
#[command(name = "debhash")]
#[command(about = "Look up hashes in Debian repository metadata", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a Packages, Release or InRelease file
    file: PathBuf,

    /// Package name (Packages) or architecture (Release/InRelease)
    first: String,

    /// Package version (Packages) or component (Release/InRelease)
    second: String,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,

    /// Hash field to report (SHA256, SHA512, MD5Sum, ...)
    #[arg(long, default_value = "SHA256")]
    hash_type: HashType,

    /// Match regardless of version (also TERMUX_WITHOUT_DEPVERSION_BINDING=true)
    #[arg(long)]
    without_version_binding: bool,

    /// Accept versions differing only in Debian revision (also TERMUX_ALLOW_REVISION_MISMATCH=true)
    #[arg(long)]
    allow_revision_mismatch: bool,

    /// Verify a downloaded package file against the hash found (Packages only)
    #[arg(long, value_name = "FILE")]
    verify: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn match_options(&self) -> MatchOptions {
        MatchOptions::from_env().merge(MatchOptions {
            without_version_binding: self.without_version_binding,
            allow_revision_mismatch: self.allow_revision_mismatch,
        })
    }
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.match_options();
    debug!("Match options: {:?}", options);

    let query = Query::new(cli.file, cli.first, cli.second, cli.hash_type.clone())?;
    let Some(answer) = query.execute(&options)? else {
        debug!("No match");
        return Ok(());
    };

    if let Some(artifact) = &cli.verify {
        match &answer {
            Answer::Package(entry) => verify_file(artifact, &cli.hash_type, &entry.hash)?,
            Answer::Index(_) => debug!("--verify only applies to Packages lookups, ignoring"),
        }
    }

    println!("{}", answer);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".bright_red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_requires_three_arguments() {
        let err = Cli::try_parse_from(["debhash", "Packages", "bash"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["debhash"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let cli = Cli::try_parse_from(["debhash", "Packages", "bash", "1.0", "extra"]).unwrap();
        assert_eq!(cli.first, "bash");
        assert_eq!(cli.second, "1.0");
        assert_eq!(cli.rest, vec!["extra".to_string()]);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["debhash", "InRelease", "aarch64", "main"]).unwrap();
        assert_eq!(cli.hash_type, HashType::default());
        assert!(!cli.without_version_binding);
        assert!(!cli.allow_revision_mismatch);
        assert!(cli.verify.is_none());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "debhash",
            "Packages",
            "bash",
            "5.1-3",
            "--hash-type",
            "SHA512",
            "--allow-revision-mismatch",
            "--verify",
            "bash.deb",
        ])
        .unwrap();
        assert_eq!(cli.hash_type.as_str(), "SHA512");
        assert!(cli.allow_revision_mismatch);
        assert!(cli.match_options().allow_revision_mismatch);
        assert_eq!(cli.verify, Some(PathBuf::from("bash.deb")));
    }

    #[test]
    fn test_run_rejects_unknown_file() {
        let cli = Cli::try_parse_from(["debhash", "foo.txt", "a", "b"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("foo.txt does not seem to be"));
    }
}
