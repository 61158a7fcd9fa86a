// src/lib.rs
pub mod config;
pub mod domain;
pub mod money;
pub mod notify;
pub mod script;

pub use domain::*;
pub use money::*;
