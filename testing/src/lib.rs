pub mod core;
#[cfg(feature = "ctrl")]
pub mod ctrl;

mod utils;
pub use utils::*;
