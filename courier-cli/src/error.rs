//! Error types emitted by the courier CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_calc::CalculatorConfigError;
use thiserror::Error;

/// Errors emitted by the courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option was present but outside its accepted range.
    #[error("--{field} {value} is invalid: {reason}")]
    InvalidOption {
        /// Option name.
        field: &'static str,
        /// Value supplied.
        value: String,
        /// Accepted range.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the snapshot file failed.
    #[error("failed to open snapshot at {path:?}: {source}")]
    OpenSnapshot {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Snapshot JSON could not be decoded.
    #[error("failed to parse snapshot JSON at {path:?}: {source}")]
    ParseSnapshot {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// Two vehicle types share an identifier.
    #[error("vehicle type {vehicle_id} is defined more than once")]
    DuplicateVehicle {
        /// Repeated identifier.
        vehicle_id: u32,
    },
    /// A courier refers to a vehicle type the snapshot does not define.
    #[error("courier {courier_id} refers to unknown vehicle type {vehicle_id}")]
    UnknownVehicle {
        /// Courier carrying the reference.
        courier_id: u64,
        /// Missing vehicle type.
        vehicle_id: u32,
    },
    /// A shop's matrix does not cover exactly its orders plus the shop.
    #[error("shop {shop_id} matrix covers {found} points, expected {expected}")]
    MatrixSize {
        /// Shop owning the matrix.
        shop_id: u64,
        /// Orders plus the shop.
        expected: usize,
        /// Matrix dimension.
        found: usize,
    },
    /// A vehicle type's calculator could not be resolved.
    #[error(transparent)]
    Calculator(#[from] CalculatorConfigError),
    /// The worker pool could not be started.
    #[error("failed to start {threads} worker threads: {source}")]
    ThreadPool {
        /// Requested thread count.
        threads: usize,
        /// Pool build failure.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
    /// Serializing the route report failed.
    #[error("failed to serialize route report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the route report failed.
    #[error("failed to write route report: {0}")]
    WriteReport(#[source] std::io::Error),
}
