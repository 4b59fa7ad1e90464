pub mod config;
pub mod telemetry;

use std::io::{BufWriter, Write};

use anyhow::Context;
use config::{Action, ClockKind, Config, GeneratorConfig, OutputFormat};
use snowmint::{BasicIdGenerator, MonotonicClock, SystemClock, TimeSource};

/// Executes one configured command, writing its output to `out`.
pub fn run<W: Write>(config: Config, out: &mut W) -> anyhow::Result<()> {
    let mut out = BufWriter::new(out);

    match config.action {
        Action::Next { count, format } => match config.generator.clock {
            ClockKind::System => mint(&config.generator, SystemClock, count, format, &mut out)?,
            ClockKind::Monotonic => mint(
                &config.generator,
                MonotonicClock::default(),
                count,
                format,
                &mut out,
            )?,
        },
        Action::Decompose { ids } => {
            for id in &ids {
                let parts =
                    snowmint::decompose(id).with_context(|| format!("cannot decompose {id:?}"))?;
                serde_json::to_writer(&mut out, &parts)?;
                writeln!(out)?;
            }
        }
        Action::Timestamp { ids } => {
            for id in &ids {
                let timestamp = snowmint::get_timestamp(id)
                    .with_context(|| format!("cannot read timestamp of {id:?}"))?;
                writeln!(out, "{timestamp}")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn mint<T, W>(
    config: &GeneratorConfig,
    clock: T,
    count: usize,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: TimeSource,
    W: Write,
{
    let generator = BasicIdGenerator::new(config.worker_id, config.process_id, clock)?;
    tracing::debug!(
        worker_id = config.worker_id,
        process_id = config.process_id,
        count,
        "minting ids"
    );

    match format {
        OutputFormat::Plain => {
            for _ in 0..count {
                writeln!(out, "{}", generator.next_id()?)?;
            }
        }
        OutputFormat::Json => {
            let ids = (0..count)
                .map(|_| generator.next_id_string())
                .collect::<snowmint::Result<Vec<_>>>()?;
            serde_json::to_writer(&mut *out, &ids)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowmint::{CUSTOM_EPOCH_MILLIS, Components};

    fn run_to_string(action: Action) -> anyhow::Result<String> {
        let config = Config {
            generator: GeneratorConfig {
                worker_id: 3,
                process_id: 4,
                clock: ClockKind::Monotonic,
            },
            action,
        };
        let mut out = Vec::new();
        run(config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn next_plain_prints_increasing_ids() {
        let out = run_to_string(Action::Next {
            count: 5000,
            format: OutputFormat::Plain,
        })
        .unwrap();

        let ids: Vec<u64> = out.lines().map(|line| line.parse().unwrap()).collect();
        assert_eq!(ids.len(), 5000);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let parts = snowmint::decompose(out.lines().next().unwrap()).unwrap();
        assert_eq!((parts.worker_id, parts.process_id), (3, 4));
    }

    #[test]
    fn next_json_prints_string_array() {
        let out = run_to_string(Action::Next {
            count: 3,
            format: OutputFormat::Json,
        })
        .unwrap();

        let ids: Vec<String> = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert!(id.bytes().all(|b| b.is_ascii_digit()), "{id}");
        }
    }

    #[test]
    fn decompose_prints_one_object_per_line() {
        let out = run_to_string(Action::Decompose {
            ids: vec!["4329472".to_owned(), "0".to_owned()],
        })
        .unwrap();

        let parts: Vec<Components> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            parts,
            vec![
                Components {
                    timestamp: CUSTOM_EPOCH_MILLIS + 1,
                    worker_id: 1,
                    process_id: 1,
                    sequence: 0,
                },
                Components {
                    timestamp: CUSTOM_EPOCH_MILLIS,
                    worker_id: 0,
                    process_id: 0,
                    sequence: 0,
                },
            ]
        );
    }

    #[test]
    fn timestamp_prints_absolute_millis() {
        let out = run_to_string(Action::Timestamp {
            ids: vec!["4329472".to_owned()],
        })
        .unwrap();
        assert_eq!(out, format!("{}\n", CUSTOM_EPOCH_MILLIS + 1));
    }

    #[test]
    fn malformed_id_names_the_input() {
        let err = run_to_string(Action::Timestamp {
            ids: vec!["12a".to_owned()],
        })
        .unwrap_err();
        assert!(err.to_string().contains("\"12a\""), "{err}");
        assert!(err.downcast_ref::<snowmint::Error>().is_some());
    }
}
