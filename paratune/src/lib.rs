#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    clippy::suspicious,
    // missing_docs,
    clippy::nursery,
    rust_2018_idioms
)]

pub mod error;
pub mod execution;
pub mod logging;
pub mod math;
pub mod metrics;
pub mod model;
pub mod partition;
pub mod planner;
pub mod predict;
pub mod settings;
pub mod task_state;

pub type Result<T> = anyhow::Result<T>;

pub type SharedString = std::borrow::Cow<'static, str>;
