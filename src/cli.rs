use clap::Parser;
use dependency_snapshots::application::dto::OutputFormat;
use std::path::PathBuf;

/// Replay a dependency change log and print the resulting snapshot
#[derive(Parser, Debug)]
#[command(name = "depsnap")]
#[command(version)]
#[command(
    about = "Replay dependency change logs into filtered per-target-framework snapshots",
    long_about = None
)]
pub struct Args {
    /// Change log to replay (YAML, or JSON when the file ends in .json)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output format: tree or json [default: tree]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to depsnap.config.yml next to the change log)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also show dependencies marked invisible
    #[arg(long)]
    pub show_hidden: bool,

    /// Exit with code 1 when a visible dependency is unresolved
    #[arg(long)]
    pub fail_on_unresolved: bool,

    /// Leave a snapshot filter out of the pipeline
    /// Can be specified multiple times: --disable-filter deduplicate-captions
    #[arg(long = "disable-filter", value_name = "NAME")]
    pub disable_filter: Vec<String>,

    /// Log engine decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let args = Args::try_parse_from(["depsnap", "-i", "changes.yml"]).unwrap();
        assert_eq!(args.input, PathBuf::from("changes.yml"));
        assert!(args.format.is_none());
        assert!(args.disable_filter.is_empty());
        assert!(!args.fail_on_unresolved);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "depsnap",
            "--input",
            "changes.json",
            "--format",
            "JSON",
            "-o",
            "out.json",
            "--show-hidden",
            "--fail-on-unresolved",
            "--disable-filter",
            "deduplicate-captions",
            "--disable-filter",
            "implicit-top-level",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.show_hidden);
        assert!(args.verbose);
        assert_eq!(args.disable_filter.len(), 2);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["depsnap"]).is_err());
    }

    #[test]
    fn test_invalid_format() {
        let err = Args::try_parse_from(["depsnap", "-i", "c.yml", "-f", "markdown"]).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }
}
