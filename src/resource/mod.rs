//! Static resources served by the listener
//!
//! Requests name a file relative to the configured static directory. The
//! resolver refuses anything that could escape that directory, fills in a
//! default `.txt` extension, picks a MIME type and loads the bytes.
//!
//! # Modules
//!
//! - [`resolver`] - Sandbox check and file loading
//! - [`mime`] - Extension to MIME type table
//! - [`content`] - Conditional and range-aware responses
//! - [`error`] - Resource errors and their HTTP status codes

pub mod content;
pub mod error;
pub mod mime;
pub mod resolver;

pub use content::{parse_range, serve_content, ByteRange};
pub use error::{ResourceError, ResourceResult};
pub use mime::{type_from_file_name, DEFAULT_FILE_EXT};
pub use resolver::{check_sandbox, file_name_for, Resource, ResourceResolver};
