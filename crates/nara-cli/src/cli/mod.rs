use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `nara` binary.
#[derive(Debug, Parser)]
#[command(name = "nara", version, about = "NARA digital library ingestion tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never draw progress bars
    #[arg(long, global = true)]
    pub no_progress: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            no_progress: self.no_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["nara", "--format", "raw", "daily", "--verbose"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Daily));
    }

    #[test]
    fn upload_commands_take_a_limit_flag() {
        let cli = Cli::try_parse_from(["nara", "upload-archive", "--limit", "3"])
            .expect("cli should parse");
        match cli.command {
            Commands::UploadArchive(args) => assert_eq!(args.limit, Some(3)),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["nara", "upload-pdfs"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::UploadPdfs(ref args) if args.limit.is_none()));
    }

    #[test]
    fn translate_takes_a_positional_limit() {
        let cli = Cli::try_parse_from(["nara", "translate", "12"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Translate(ref args) if args.limit == Some(12)));

        assert!(Cli::try_parse_from(["nara", "translate", "many"]).is_err());
    }

    #[test]
    fn schedule_accepts_cron_override() {
        let cli = Cli::try_parse_from(["nara", "schedule", "--cron", "0 3 * * *", "--run-now"])
            .expect("cli should parse");
        match cli.command {
            Commands::Schedule(args) => {
                assert_eq!(args.cron.as_deref(), Some("0 3 * * *"));
                assert!(args.run_now);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["nara", "--format", "xml", "status"]).is_err());
    }
}
