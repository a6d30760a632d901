pub mod builder;
pub mod transform;
pub mod validator;

pub use builder::*;
pub use transform::*;
pub use validator::*;
