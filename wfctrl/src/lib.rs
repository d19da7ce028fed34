pub mod error;
pub mod platform;
pub mod resolve;
pub mod seed;
mod validate;

pub use platform::Platform;
