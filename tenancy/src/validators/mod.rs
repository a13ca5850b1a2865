mod datetime;
mod error;
mod literal;
mod project_status;

pub use datetime::datetime;
pub use error::flatten_errors;
pub use literal::{ok_status, service_name};
pub use project_status::project_status;
