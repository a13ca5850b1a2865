use deadpool_diesel::{InteractError, PoolError};
use snafu::{Backtrace, Snafu};
use tenancy::dto::InvalidProjectStatusError;
use tenancy::role::InvalidRoleError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Error creating db pool: {}", msg))]
    DbBuild { msg: String },

    #[snafu(display("Error getting db connection: {}", source))]
    DbPool {
        source: PoolError,
        backtrace: Backtrace,
    },

    #[snafu(display("Error using the db connection: {}", source))]
    DbInteract {
        source: InteractError,
        backtrace: Backtrace,
    },

    #[snafu(display("Error querying {}: {}", table, source))]
    DbQuery {
        table: String,
        source: diesel::result::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Bad row in {}: {}", table, source))]
    InvalidRole {
        table: String,
        source: InvalidRoleError,
        backtrace: Backtrace,
    },

    #[snafu(display("Bad row in {}: {}", table, source))]
    InvalidProjectStatus {
        table: String,
        source: InvalidProjectStatusError,
        backtrace: Backtrace,
    },

    #[snafu(display("{}", msg))]
    Whatever { msg: String },
}

// Allow string slices to be converted to Error
impl From<&str> for Error {
    fn from(val: &str) -> Self {
        Self::Whatever {
            msg: val.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(val: String) -> Self {
        Self::Whatever { msg: val }
    }
}
