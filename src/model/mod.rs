pub mod chip;
pub mod config;
pub mod entry;
pub mod host;
pub mod item;

pub use chip::*;
pub use config::*;
pub use entry::*;
pub use host::*;
pub use item::*;
