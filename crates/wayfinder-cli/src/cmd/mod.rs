pub mod check;
pub mod locations;
pub mod neighbors;
pub mod route;

use wayfinder_core::RouteError;

use crate::output::CliError;

/// Map a command failure to the structured error shown to the user.
///
/// Routing errors keep their stable code and hint; anything else (I/O,
/// parse, config) is reported with its full context chain.
pub fn cli_error(err: &anyhow::Error) -> CliError {
    err.downcast_ref::<RouteError>()
        .map_or_else(|| CliError::new(format!("{err:#}")), CliError::from)
}
