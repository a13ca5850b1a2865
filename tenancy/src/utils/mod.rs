mod datetime;
mod origin;

pub use datetime::*;
pub use origin::*;
