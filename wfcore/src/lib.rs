pub mod entity;
pub mod error;
pub mod platform;
pub mod project;
pub mod role;
pub mod status;
pub mod workflow;
