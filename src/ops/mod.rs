pub mod dispatch;
pub mod host;
pub mod notebook_ops;

pub use dispatch::*;
pub use host::*;
pub use notebook_ops::*;
