mod error;
mod event;
mod membership;
mod org;
mod project;
mod user;

pub use error::*;
pub use event::*;
pub use membership::*;
pub use org::*;
pub use project::*;
pub use user::*;
