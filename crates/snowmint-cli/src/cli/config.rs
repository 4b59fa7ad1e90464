use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use snowmint::SnowmintId;

/// Upper bound on IDs minted by one `next` invocation.
pub const MAX_COUNT: usize = 1_000_000;

/// Runtime configuration for the `snowmint` binary.
///
/// Identity and clock settings are parsed from CLI arguments or environment
/// variables (a `.env` file in the working directory is loaded first). They
/// apply to every subcommand, though only `next` mints IDs.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowmint",
    version,
    about = "Mint and decode time-ordered 64-bit snowmint IDs"
)]
pub struct CliArgs {
    /// Worker ID packed into minted IDs, in `[0, 31]`.
    ///
    /// The `(worker, process)` pair must be unique across every generator
    /// sharing an ID namespace.
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(
        long,
        env = "WORKER_ID",
        default_value_t = 0,
        allow_negative_numbers = true,
        global = true
    )]
    pub worker_id: i64,

    /// Process ID packed into minted IDs, in `[0, 31]`.
    ///
    /// Environment variable: `PROCESS_ID`
    #[arg(
        long,
        env = "PROCESS_ID",
        default_value_t = 0,
        allow_negative_numbers = true,
        global = true
    )]
    pub process_id: i64,

    /// Time source used for minting.
    ///
    /// `system` reads the wall clock on every call. `monotonic` anchors to the
    /// wall clock once and then advances with the monotonic timer, so it never
    /// reports a regression within one run.
    ///
    /// Environment variable: `SNOWMINT_CLOCK`
    #[arg(long, env = "SNOWMINT_CLOCK", value_enum, default_value_t = ClockKind::System, global = true)]
    pub clock: ClockKind,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mint new IDs and print them as decimal strings.
    Next {
        /// Number of IDs to mint.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Output layout.
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Print the fields of each ID as one JSON object per line.
    Decompose {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// Print the absolute Unix millisecond timestamp of each ID.
    Timestamp {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    System,
    Monotonic,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One ID per line.
    Plain,
    /// A single JSON array of decimal strings.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub worker_id: u8,
    pub process_id: u8,
    pub clock: ClockKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next { count: usize, format: OutputFormat },
    Decompose { ids: Vec<String> },
    Timestamp { ids: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub action: Action,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let max_worker_id = i64::from(SnowmintId::MAX_WORKER_ID);
        let max_process_id = i64::from(SnowmintId::MAX_PROCESS_ID);

        if !(0..=max_worker_id).contains(&args.worker_id) {
            bail!(
                "WORKER_ID ({}) is outside the worker ID space [0, {}]",
                args.worker_id,
                max_worker_id
            );
        }

        if !(0..=max_process_id).contains(&args.process_id) {
            bail!(
                "PROCESS_ID ({}) is outside the process ID space [0, {}]",
                args.process_id,
                max_process_id
            );
        }

        let action = match args.command {
            Command::Next { count, format } => {
                if count == 0 {
                    bail!("--count must be greater than 0");
                }
                if count > MAX_COUNT {
                    bail!("--count ({}) exceeds the maximum of {}", count, MAX_COUNT);
                }
                Action::Next { count, format }
            }
            Command::Decompose { ids } => Action::Decompose { ids },
            Command::Timestamp { ids } => Action::Timestamp { ids },
        };

        Ok(Self {
            generator: GeneratorConfig {
                worker_id: u8::try_from(args.worker_id)?,
                process_id: u8::try_from(args.process_id)?,
                clock: args.clock,
            },
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> anyhow::Result<Config> {
        let args = CliArgs::try_parse_from(core::iter::once("snowmint").chain(argv.iter().copied()))?;
        Config::try_from(args)
    }

    #[test]
    fn defaults_to_slot_zero_and_one_id() {
        let config = config(&["next"]).unwrap();
        assert_eq!(
            config.generator,
            GeneratorConfig {
                worker_id: 0,
                process_id: 0,
                clock: ClockKind::System,
            }
        );
        assert_eq!(
            config.action,
            Action::Next {
                count: 1,
                format: OutputFormat::Plain,
            }
        );
    }

    #[test]
    fn accepts_identity_bounds() {
        let config = config(&[
            "--worker-id",
            "31",
            "--process-id",
            "31",
            "--clock",
            "monotonic",
            "next",
            "-n",
            "5",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.generator.worker_id, 31);
        assert_eq!(config.generator.process_id, 31);
        assert_eq!(config.generator.clock, ClockKind::Monotonic);
        assert_eq!(
            config.action,
            Action::Next {
                count: 5,
                format: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let config = config(&["next", "--worker-id", "4"]).unwrap();
        assert_eq!(config.generator.worker_id, 4);
    }

    #[test]
    fn rejects_out_of_range_identity() {
        let err = config(&["--worker-id", "32", "next"]).unwrap_err();
        assert!(err.to_string().contains("WORKER_ID (32)"), "{err}");

        let err = config(&["--process-id", "-1", "next"]).unwrap_err();
        assert!(err.to_string().contains("PROCESS_ID (-1)"), "{err}");
    }

    #[test]
    fn rejects_count_outside_bounds() {
        let err = config(&["next", "--count", "0"]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"), "{err}");

        let too_many = (MAX_COUNT + 1).to_string();
        let err = config(&["next", "--count", &too_many]).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"), "{err}");
    }

    #[test]
    fn decode_commands_require_ids() {
        assert!(config(&["decompose"]).is_err());
        assert!(config(&["timestamp"]).is_err());

        let config = config(&["decompose", "4329472", "0"]).unwrap();
        assert_eq!(
            config.action,
            Action::Decompose {
                ids: vec!["4329472".to_owned(), "0".to_owned()],
            }
        );
    }
}
