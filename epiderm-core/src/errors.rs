use epiderm_concepts::*;
use core::fmt::Display;

macro_rules! impl_error_variant {
    ($name: ident, $($err_var: ident),+) => {
        // Implement Display for ErrorVariant
        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        $name::$err_var(message) => write!(f, "{}", message),
                    )+
                }
            }
        }
    }
}

macro_rules! impl_from_error {
    ($name: ident, $(($err_var: ident, $err_type: ty)),+) => {
        $(
            // Implement conversion from error to errorvariant
            impl From<$err_type> for $name {
                fn from(err: $err_type) -> Self {
                    $name::$err_var(err)
                }
            }
        )+
    }
}

/// Error related to storing and reading snapshots
#[derive(Debug)]
pub enum StorageError {
    /// Error related to File Io operations.
    IoError(std::io::Error),
    /// Occurs during parsing of json structs.
    SerdeJsonError(serde_json::Error),
    /// Folder names of iterations could not be parsed.
    ParseIntError(std::num::ParseIntError),
}

impl_from_error! {StorageError,
    (IoError, std::io::Error),
    (SerdeJsonError, serde_json::Error),
    (ParseIntError, std::num::ParseIntError)
}

impl_error_variant! {StorageError,
    IoError,
    SerdeJsonError,
    ParseIntError
}

impl std::error::Error for StorageError {}

/// Covers all errors that can occur in this Simulation
///
/// The errors are listed from very likely to be a user error to almost certainly an internal
/// error.
#[derive(Debug)]
pub enum SimulationError {
    // Very likely to be user errors
    /// See [InvalidArgument]
    InvalidArgument(InvalidArgument),
    /// See [InconsistentState]
    InconsistentState(InconsistentState),
    /// See [CalcError]
    CalcError(CalcError),
    /// See [TimeError]
    TimeError(TimeError),

    // Less likely but possible to be user errors
    /// See [StorageError]
    StorageError(StorageError),
    /// Error related to file Io operations
    IoError(std::io::Error),

    // Highly unlikely to be user errors
    /// See [DivisionError]
    DivisionError(DivisionError),
    /// The thread pool for the parallel phase could not be built
    ThreadingError(rayon::ThreadPoolBuildError),
}

impl_from_error! {SimulationError,
    (InvalidArgument, InvalidArgument),
    (InconsistentState, InconsistentState),
    (CalcError, CalcError),
    (TimeError, TimeError),
    (StorageError, StorageError),
    (IoError, std::io::Error),
    (DivisionError, DivisionError),
    (ThreadingError, rayon::ThreadPoolBuildError)
}

impl_error_variant! {SimulationError,
    InvalidArgument,
    InconsistentState,
    CalcError,
    TimeError,
    StorageError,
    IoError,
    DivisionError,
    ThreadingError
}

impl std::error::Error for SimulationError {}

impl From<LineageError> for SimulationError {
    fn from(err: LineageError) -> Self {
        match err {
            LineageError::InconsistentState(e) => SimulationError::InconsistentState(e),
            LineageError::DivisionError(e) => SimulationError::DivisionError(e),
        }
    }
}
