pub mod client;
pub mod download;
pub mod endpoints;
pub mod global;
pub mod interceptor;

pub use crate::domain::model::{DocumentBlob, Operation, UploadFile};
pub use crate::domain::ports::{ConfigProvider, DocumentApi};
pub use crate::utils::error::Result;
