#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliArgs, Command};
pub use config::ClientConfig;

pub use crate::core::client::ApiClient;
pub use crate::core::global::{global, init};
pub use domain::model::{DocumentBlob, Operation, UploadFile};
pub use domain::ports::DocumentApi;
pub use utils::error::{ClientError, Result};
