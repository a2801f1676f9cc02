mod cli;

use cli::Args;
use dependency_snapshots::adapters::outbound::console::StderrProgressReporter;
use dependency_snapshots::adapters::outbound::filesystem::FileSystemReader;
use dependency_snapshots::adapters::outbound::providers::builtin_registry;
use dependency_snapshots::application::dto::{OutputFormat, ReplayRequest};
use dependency_snapshots::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType,
};
use dependency_snapshots::application::read_models::{ReportMetadata, SnapshotReadModelBuilder};
use dependency_snapshots::application::use_cases::ReplayChangesUseCase;
use dependency_snapshots::config::{self, ConfigFile};
use dependency_snapshots::ports::inbound::SnapshotReplayPort;
use dependency_snapshots::shared::{ExitCode, Result};
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug and the default is warn
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Settings after merging CLI flags over the config file
#[derive(Debug)]
struct Settings {
    format: OutputFormat,
    show_hidden: bool,
    fail_on_unresolved: bool,
    disabled_filters: Vec<String>,
}

impl Settings {
    fn merge(args: &Args, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();
        let disabled_filters = if args.disable_filter.is_empty() {
            config.disabled_filters.clone().unwrap_or_default()
        } else {
            args.disable_filter.clone()
        };

        Self {
            format: args
                .format
                .or_else(|| config.output_format())
                .unwrap_or_default(),
            show_hidden: args.show_hidden || config.show_hidden.unwrap_or(false),
            fail_on_unresolved: args.fail_on_unresolved
                || config.fail_on_unresolved.unwrap_or(false),
            disabled_filters,
        }
    }
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path).map(Some);
    }

    let dir = args
        .input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    config::discover_config(dir)
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = Settings::merge(&args, config);
    tracing::debug!(?settings, "Resolved settings");

    // Create adapters (Dependency Injection)
    let change_log_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();
    let use_case =
        ReplayChangesUseCase::new(change_log_reader, progress_reporter, builtin_registry());

    let request = ReplayRequest::new(args.input.clone(), settings.disabled_filters.clone());
    let response = use_case.replay(request)?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));

    let model = SnapshotReadModelBuilder::new(use_case.subtree_providers())
        .include_hidden(settings.show_hidden)
        .build(&response.snapshot, ReportMetadata::generate_default());

    let colored = args.output.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(settings.format, colored);
    let rendered = formatter.format(&model)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output.clone()));
    presenter.present(&rendered)?;

    if settings.fail_on_unresolved && response.has_visible_unresolved_dependency() {
        eprintln!("⚠️  Visible unresolved dependencies remain in the snapshot.");
        return Ok(ExitCode::UnresolvedDependencies);
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["depsnap", "-i", "changes.yml"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn config(yaml: &str) -> ConfigFile {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::merge(&args(&[]), None);
        assert_eq!(settings.format, OutputFormat::Tree);
        assert!(!settings.show_hidden);
        assert!(!settings.fail_on_unresolved);
        assert!(settings.disabled_filters.is_empty());
    }

    #[test]
    fn test_config_values_apply() {
        let settings = Settings::merge(
            &args(&[]),
            Some(config("format: json\nshow_hidden: true\ndisabled_filters: [sdk-package-link]\n")),
        );
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.show_hidden);
        assert_eq!(settings.disabled_filters, vec!["sdk-package-link".to_string()]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let settings = Settings::merge(
            &args(&["-f", "tree", "--disable-filter", "implicit-top-level"]),
            Some(config("format: json\ndisabled_filters: [sdk-package-link]\n")),
        );
        assert_eq!(settings.format, OutputFormat::Tree);
        assert_eq!(settings.disabled_filters, vec!["implicit-top-level".to_string()]);
    }
}
