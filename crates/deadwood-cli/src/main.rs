//! Deadwood CLI - read-only orphan file reporter for front-end projects.

use clap::Parser;
use deadwood_cli::cli::analysis::{run_analysis, AnalysisRunOptions, OutputFormat};
use deadwood_cli::logging::init_logging;
use deadwood_config::ConfigOverrides;
use deadwood_core::{AliasRule, Error};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "deadwood", version)]
#[command(about = "Report empty files, suspicious directories and missing known paths in a front-end tree", long_about = None)]
struct Cli {
    /// Project root to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value = "human")]
    format: Format,

    /// Output JSON format (alias for --output json)
    #[arg(long)]
    json: bool,

    /// Configuration file path (default: <ROOT>/.deadwood.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Additional directory names to skip (can be specified multiple times)
    #[arg(long = "ignore-dir", value_name = "NAME")]
    ignore_dirs: Vec<String>,

    /// Alias substitution for import specifiers, e.g. "@/=src/"
    #[arg(long, value_name = "PREFIX=BASE", value_parser = parse_alias)]
    alias: Option<AliasRule>,

    /// Trimmed character count below which a code file is reported as small
    #[arg(long = "small-threshold", value_name = "N")]
    small_threshold: Option<usize>,

    /// Known-used path to check (can be specified multiple times; replaces the configured list)
    #[arg(long = "known", value_name = "PATH")]
    known: Vec<String>,

    /// Also respect .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace; RUST_LOG overrides)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Human,
    Json,
}

fn parse_alias(value: &str) -> Result<AliasRule, String> {
    let (prefix, base) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PREFIX=BASE, got '{}'", value))?;
    if prefix.is_empty() {
        return Err("alias prefix must not be empty".to_string());
    }
    Ok(AliasRule {
        prefix: prefix.to_string(),
        base: base.to_string(),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        match cli.format {
            Format::Human => OutputFormat::Human,
            Format::Json => OutputFormat::Json,
        }
    };

    let options = AnalysisRunOptions {
        root: cli.root,
        config: cli.config,
        overrides: ConfigOverrides {
            extra_ignored_dirs: cli.ignore_dirs,
            alias: cli.alias,
            small_file_threshold: cli.small_threshold,
            known_used: cli.known,
            respect_gitignore: cli.gitignore,
        },
        format,
    };

    match run_analysis(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match root_error(&err) {
                Some(e) => eprintln!("{}", e),
                None => eprintln!("Error: {:?}", err),
            }
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// The root error behind `err`, if the project root itself was unusable.
fn root_error(err: &anyhow::Error) -> Option<&Error> {
    err.chain()
        .filter_map(|e| e.downcast_ref::<Error>())
        .find(|e| {
            matches!(
                e,
                Error::NoProjectRoot | Error::ProjectRootNotFound { .. } | Error::NotADirectory { .. }
            )
        })
}

/// 2 for an unusable project root, 1 for anything else.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    if root_error(err).is_some() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadwood_cli::cli::analysis::analyze;
    use std::fs;
    use tempfile::TempDir;

    fn run_options(root: PathBuf) -> AnalysisRunOptions {
        AnalysisRunOptions {
            root,
            config: None,
            overrides: ConfigOverrides::default(),
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_parse_alias() {
        assert_eq!(
            parse_alias("~/=app/"),
            Ok(AliasRule {
                prefix: "~/".to_string(),
                base: "app/".to_string()
            })
        );
        assert!(parse_alias("@/").is_err());
        assert!(parse_alias("=src/").is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["deadwood"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(matches!(cli.format, Format::Human));
        assert!(cli.known.is_empty());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_repeatable_flags() {
        let cli = Cli::parse_from([
            "deadwood",
            "web",
            "--ignore-dir",
            "coverage",
            "--ignore-dir",
            "storybook-static",
            "--known",
            "src/main.tsx",
            "--alias",
            "@/=src/",
            "--small-threshold",
            "10",
            "-vv",
            "--json",
        ]);

        assert_eq!(cli.root, PathBuf::from("web"));
        assert_eq!(cli.ignore_dirs, vec!["coverage", "storybook-static"]);
        assert_eq!(cli.known, vec!["src/main.tsx"]);
        assert_eq!(cli.small_threshold, Some(10));
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_output_flag() {
        let cli = Cli::try_parse_from(["deadwood", "-o", "json"]).unwrap();
        assert!(matches!(cli.format, Format::Json));
        assert!(Cli::try_parse_from(["deadwood", "-f", "json"]).is_err());
    }

    #[test]
    fn test_missing_root_exits_with_2() {
        let temp = TempDir::new().unwrap();
        let err = analyze(&run_options(temp.path().join("missing"))).unwrap_err();

        assert_eq!(exit_code_for(&err), 2);
        assert!(matches!(root_error(&err), Some(Error::ProjectRootNotFound { .. })));
    }

    #[test]
    fn test_file_root_exits_with_2() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("main.ts");
        fs::write(&file, "").unwrap();
        let err = analyze(&run_options(file)).unwrap_err();

        assert_eq!(exit_code_for(&err), 2);
        assert!(matches!(root_error(&err), Some(Error::NotADirectory { .. })));
    }

    #[test]
    fn test_invalid_config_exits_with_1() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".deadwood.toml"),
            "[report]\nsmall_file_threshold = 0\n",
        )
        .unwrap();
        let err = analyze(&run_options(temp.path().to_path_buf())).unwrap_err();

        assert_eq!(exit_code_for(&err), 1);
        assert!(root_error(&err).is_none());
        assert!(format!("{:?}", err).contains("Failed to load configuration"));
    }

    #[test]
    fn test_root_error_is_found_behind_context() {
        let err = anyhow::Error::new(Error::NoProjectRoot).context("Analysis failed");
        assert_eq!(exit_code_for(&err), 2);
        assert_eq!(root_error(&err).unwrap().to_string(), "No project directory selected");
    }
}
