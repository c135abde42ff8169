use crate::convert::{ErrorLike, RenderFn, default_render};
use crate::error::{Result, TagError};
use crate::markers::Markers;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::fmt;

/// A taggable error value with a declared type name.
///
/// Constructed values are pre-tagged: `is_exception()` holds and the marker
/// for the declared name is asserted. Name, message, and trace are fixed at
/// construction; the trace comes from the platform's native capture facility
/// and is treated as an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exception {
    name: String,
    message: String,
    trace: String,
    markers: Markers,
    #[serde(skip)]
    renderer: Option<RenderFn>,
}

impl Exception {
    /// Creates an exception named `name` with the default message
    /// `"Error of type <name>"`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::build(name.into(), None)
    }

    /// Creates an exception with an explicit message. An empty message falls
    /// back to the default.
    pub fn with_message(name: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        Self::build(name.into(), Some(message.into()))
    }

    fn build(name: String, message: Option<String>) -> Result<Self> {
        if name.is_empty() {
            return Err(TagError::ArgumentNull { argument: "name" });
        }
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => format!("Error of type {name}"),
        };
        let mut markers = Markers::new();
        markers.set_exception();
        markers.assert(name.as_str());
        Ok(Self {
            trace: Backtrace::force_capture().to_string(),
            markers,
            name,
            message,
            renderer: None,
        })
    }

    /// Attach a custom rendering behavior. Conversion never replaces it.
    pub fn with_renderer(mut self, renderer: RenderFn) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Rebuild a value from already-captured fields (untyped-boundary lift).
    pub(crate) fn rehydrate(
        name: String,
        message: String,
        trace: String,
        markers: Markers,
    ) -> Self {
        Self {
            name,
            message,
            trace,
            markers,
            renderer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn is_exception(&self) -> bool {
        self.markers.is_exception()
    }

    pub fn has_marker(&self, type_name: &str) -> bool {
        self.markers.has(type_name)
    }

    /// Renders the value: the custom renderer when attached, else the
    /// default rule over name and message.
    pub fn render(&self) -> String {
        match self.renderer {
            Some(f) => f(self),
            None => default_render(self),
        }
    }
}

impl ErrorLike for Exception {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn trace(&self) -> &str {
        &self.trace
    }

    fn markers(&self) -> &Markers {
        &self.markers
    }

    fn markers_mut(&mut self) -> &mut Markers {
        &mut self.markers
    }

    fn renderer(&self) -> Option<RenderFn> {
        self.renderer
    }

    fn set_renderer(&mut self, renderer: RenderFn) {
        self.renderer = Some(renderer);
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for Exception {}
