//! Enumerate command implementation for the courier CLI.

use std::io::{BufWriter, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use courier_calc::{CalculatorRegistry, CourierPool};
use courier_core::MAX_ROUTE_LEN;
use courier_routes::{EnumerationConfig, RouteEnumerator, ShopRoutes, ShopTask};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{create_utf8_file, file_is_file};
use crate::report::{CourierRoutes, RouteReport};
use crate::snapshot::{Snapshot, load_snapshot};
use crate::{
    ARG_DEADLINE_MS, ARG_MAX_ROUTE_LEN, ARG_OUTPUT, ARG_SNAPSHOT, ARG_THREADS, CliError,
    ENV_SNAPSHOT,
};

/// CLI arguments for the `enumerate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Enumerate every feasible order bundle per shop and courier \
                 from a JSON dispatch snapshot. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Enumerate feasible delivery routes"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct EnumerateArgs {
    /// Path to a JSON dispatch snapshot.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Longest bundle to build, between 1 and 8 orders.
    #[arg(long = ARG_MAX_ROUTE_LEN, value_name = "orders")]
    #[serde(default)]
    pub(crate) max_route_len: Option<usize>,
    /// Search budget per courier in milliseconds.
    #[arg(long = ARG_DEADLINE_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) deadline_ms: Option<u64>,
    /// Worker threads for the shop fan-out.
    #[arg(long = ARG_THREADS, value_name = "count")]
    #[serde(default)]
    pub(crate) threads: Option<usize>,
    /// Write the report to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl EnumerateArgs {
    pub(crate) fn into_config(self) -> Result<EnumerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EnumerateConfig::try_from(merged)
    }
}

/// Resolved `enumerate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumerateConfig {
    /// Path to the snapshot file.
    pub(crate) snapshot: Utf8PathBuf,
    /// Search bounds handed to the enumerator.
    pub(crate) enumeration: EnumerationConfig,
    /// Dedicated worker count; the global rayon pool when absent.
    pub(crate) threads: Option<usize>,
    /// Report destination; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl EnumerateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.snapshot, ARG_SNAPSHOT)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<EnumerateArgs> for EnumerateConfig {
    type Error = CliError;

    fn try_from(args: EnumerateArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_SNAPSHOT,
        })?;

        let max_route_len = args.max_route_len.unwrap_or(MAX_ROUTE_LEN);
        if max_route_len == 0 || max_route_len > MAX_ROUTE_LEN {
            return Err(CliError::InvalidOption {
                field: ARG_MAX_ROUTE_LEN,
                value: max_route_len.to_string(),
                reason: "expected 1 to 8 orders",
            });
        }
        let deadline = match args.deadline_ms {
            Some(0) => {
                return Err(CliError::InvalidOption {
                    field: ARG_DEADLINE_MS,
                    value: "0".into(),
                    reason: "the budget must be positive",
                });
            }
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        };
        if args.threads == Some(0) {
            return Err(CliError::InvalidOption {
                field: ARG_THREADS,
                value: "0".into(),
                reason: "at least one worker is required",
            });
        }

        Ok(Self {
            snapshot,
            enumeration: EnumerationConfig {
                max_route_len,
                deadline,
            },
            threads: args.threads,
            output: args.output,
        })
    }
}

pub(super) fn run_enumerate(args: EnumerateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_enumerate_with(args, &mut stdout)
}

pub(super) fn run_enumerate_with(
    args: EnumerateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_enumerate_config(args)?;
    let snapshot = load_snapshot(&config.snapshot)?;
    let report = build_report(&config, &snapshot)?;
    match &config.output {
        Some(path) => {
            let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let mut buffered = BufWriter::new(file);
            write_report(&mut buffered, &report)?;
            buffered.flush().map_err(CliError::WriteReport)
        }
        None => write_report(writer, &report),
    }
}

fn resolve_enumerate_config(args: EnumerateArgs) -> Result<EnumerateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Bind couriers, fan shops out across workers and collect the results.
pub(super) fn build_report(
    config: &EnumerateConfig,
    snapshot: &Snapshot,
) -> Result<RouteReport, CliError> {
    snapshot.validate()?;
    let pool = CourierPool::build(snapshot.couriers()?, &CalculatorRegistry::with_defaults())?;
    let calc_time = snapshot.calc_time;
    for bound in pool.iter() {
        if !bound.courier().is_available_at(calc_time) {
            log::warn!(
                "courier {} is not available at {calc_time}; skipped",
                bound.courier().id
            );
        }
    }

    let mut closed_shops = Vec::new();
    let mut tasks = Vec::with_capacity(snapshot.shops.len());
    for record in &snapshot.shops {
        if !record.shop.is_open(calc_time) {
            log::warn!("shop {} is closed at {calc_time}; skipped", record.shop.id);
            closed_shops.push(record.shop.id);
            continue;
        }
        tasks.push(ShopTask {
            shop: &record.shop,
            orders: &record.orders,
            couriers: pool
                .couriers_for(record.shop.id)
                .filter(|bound| bound.courier().is_available_at(calc_time))
                .collect(),
            matrix: &record.matrix,
        });
    }

    let enumerator = RouteEnumerator::with_config(config.enumeration);
    let found = run_tasks(&enumerator, &tasks, config.threads, calc_time)?;
    Ok(RouteReport {
        calc_time,
        closed_shops,
        results: found.iter().map(CourierRoutes::from).collect(),
    })
}

fn run_tasks<'a>(
    enumerator: &RouteEnumerator,
    tasks: &[ShopTask<'a>],
    threads: Option<usize>,
    calc_time: DateTime<Utc>,
) -> Result<Vec<ShopRoutes<'a>>, CliError> {
    let Some(threads) = threads else {
        return Ok(enumerator.enumerate_shops(tasks, calc_time));
    };
    let workers = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|source| CliError::ThreadPool { threads, source })?;
    Ok(workers.install(|| enumerator.enumerate_shops(tasks, calc_time)))
}

fn write_report(writer: &mut dyn Write, report: &RouteReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<EnumerateConfig, CliError> {
    let merged = EnumerateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EnumerateConfig::try_from(merged)
}
