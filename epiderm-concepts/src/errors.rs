use core::fmt::Display;
use std::error::Error;

macro_rules! define_errors {
    ($(($err_name: ident, $err_descr: expr)),+) => {
        $(
            #[doc = $err_descr]
            #[derive(Debug,Clone,PartialEq)]
            pub struct $err_name(
                #[doc = "Error message associated with "]
                #[doc = stringify!($err_name)]
                #[doc = " error type."]
                pub String,
            );

            impl Display for $err_name {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl Error for $err_name {}
        )+
    }
}

define_errors!(
    (
        InvalidArgument,
        "Malformed input such as seeding bounds, negative counts or unknown type codes"
    ),
    (
        InconsistentState,
        "An agent whose differentiation type does not match its attached behavior module"
    ),
    (DivisionError, "Errors related to a cell dividing process"),
    (CalcError, "General Calculation Error"),
    (
        TimeError,
        "Error related to advancing the simulation time or displaying its progress"
    )
);

impl From<String> for TimeError {
    fn from(value: String) -> Self {
        TimeError(value)
    }
}

impl From<InvalidArgument> for CalcError {
    fn from(value: InvalidArgument) -> Self {
        CalcError(format!("{}", value))
    }
}

/// Errors which can occur when a single agent executes its lineage step.
#[derive(Clone, Debug, PartialEq)]
pub enum LineageError {
    /// The attached behavior does not serve the type of the agent.
    InconsistentState(InconsistentState),
    /// The division protocol refused to spawn a daughter.
    DivisionError(DivisionError),
}

impl Display for LineageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LineageError::InconsistentState(e) => write!(f, "{}", e),
            LineageError::DivisionError(e) => write!(f, "{}", e),
        }
    }
}

impl Error for LineageError {}

impl From<InconsistentState> for LineageError {
    fn from(value: InconsistentState) -> Self {
        LineageError::InconsistentState(value)
    }
}

impl From<DivisionError> for LineageError {
    fn from(value: DivisionError) -> Self {
        LineageError::DivisionError(value)
    }
}
