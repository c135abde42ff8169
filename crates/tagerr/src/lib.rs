//! Type-tagged error values.
//!
//! Errors carry a declared type name and a set of boolean capability
//! markers (`isException`, `is<Name>Exception`) that downstream code queries
//! to classify an error without knowing its concrete shape or origin.
//! Purpose-built values come pre-tagged from [`Exception::new`]; errors
//! caught from unrelated code are retrofitted in place with [`convert`],
//! which never double-tags and never clobbers an existing marker or custom
//! renderer.

pub mod boundary;
pub mod convert;
pub mod error;
pub mod exception;
pub mod markers;

pub use boundary::{convert_value, is_error_like, render_value, tagged_exception, to_exception};
pub use convert::{CaughtError, ErrorLike, RenderFn, convert, default_render, render};
pub use error::{Result, TagError};
pub use exception::Exception;
pub use markers::{Markers, marker_name};
