pub mod config;
pub mod context;
pub mod item;
pub mod notebook;
pub mod page;
pub mod section;
pub mod session;

pub use config::*;
pub use context::*;
pub use item::*;
pub use notebook::*;
pub use page::*;
pub use section::*;
pub use session::*;
