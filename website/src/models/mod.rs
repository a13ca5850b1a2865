pub mod dashboard;
pub mod login;
pub mod template;

pub use dashboard::*;
pub use login::*;
pub use template::*;
