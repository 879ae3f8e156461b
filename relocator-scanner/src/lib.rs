pub mod document;
pub mod error;

pub use document::Document;
pub use error::{LocateError, Result};
