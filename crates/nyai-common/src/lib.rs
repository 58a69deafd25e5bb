//! Shared building blocks for nyai: the error taxonomy plus the small
//! stateless helpers callers use before handing input to a session.

pub mod encode;
pub mod errors;
pub mod template;

pub use encode::{guess_mime_type, path_to_base64};
pub use errors::{ConfigError, NyaiError, TemplateError};
pub use template::{safe_format, safe_format_with};

pub type Result<T> = std::result::Result<T, NyaiError>;
