pub mod core;
pub use crate::core::*;

pub mod error;
pub use crate::error::*;

pub mod diagnostics;
pub use crate::diagnostics::*;

pub mod dataset;
pub use crate::dataset::*;

pub mod mapper;
pub use crate::mapper::*;

pub mod bill;
pub use crate::bill::*;

pub mod delivery;
pub use crate::delivery::*;

pub mod config;
pub use crate::config::Config;

pub mod logging;

pub mod pipeline;
pub use crate::pipeline::*;
