pub mod config_io;
pub mod lock;
pub mod merge;
pub mod snapshot;
pub mod store;
pub mod watcher;
