use crate::markers::Markers;
use std::backtrace::Backtrace;
use std::fmt;

/// A custom rendering behavior attachable to an error value.
pub type RenderFn = fn(&dyn ErrorLike) -> String;

/// The interface an error value exposes to the tagging machinery.
///
/// Inside the crate every value is reached through this trait; structural
/// duck-typing of untrusted values happens only at the boundary module.
pub trait ErrorLike {
    fn type_name(&self) -> &str;
    fn message(&self) -> &str;
    fn trace(&self) -> &str;
    fn markers(&self) -> &Markers;
    fn markers_mut(&mut self) -> &mut Markers;
    fn renderer(&self) -> Option<RenderFn>;
    fn set_renderer(&mut self, renderer: RenderFn);
}

/// A platform-native or otherwise foreign error, caught and adapted so it
/// can participate in the tagging scheme. Starts untagged; pass it through
/// [`convert`] to assert its markers. The trace is captured at adaption
/// time, keeping the diagnostic context of the catch site.
#[derive(Debug, Clone)]
pub struct CaughtError {
    name: String,
    message: String,
    trace: String,
    markers: Markers,
    renderer: Option<RenderFn>,
}

impl CaughtError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            trace: Backtrace::force_capture().to_string(),
            markers: Markers::new(),
            renderer: None,
        }
    }

    /// Adapt any std error; the message comes from its `Display` form.
    pub fn from_error(name: impl Into<String>, source: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(name, source.to_string())
    }

    /// Adapt an `anyhow::Error`, which is not itself a std error.
    pub fn from_anyhow(name: impl Into<String>, source: &anyhow::Error) -> Self {
        Self::new(name, source.to_string())
    }
}

impl ErrorLike for CaughtError {
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

impl fmt::Display for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Tags `value` in place so it satisfies the exception contract, and hands
/// the same value back. Idempotent: markers already asserted are left
/// untouched, and an existing custom renderer is never replaced.
pub fn convert<E: ErrorLike + ?Sized>(value: &mut E) -> &mut E {
    let name = value.type_name().to_string();
    if !value.markers().is_exception() {
        value.markers_mut().set_exception();
        // Untagged values with no renderer of their own get the default;
        // values carrying a custom renderer keep it.
        if value.renderer().is_none() {
            value.set_renderer(default_render);
        }
    }
    if !value.markers().has(&name) {
        value.markers_mut().assert(name);
    }
    value
}

/// Renders a value: its custom renderer when attached, else the default rule.
pub fn render(value: &dyn ErrorLike) -> String {
    match value.renderer() {
        Some(f) => f(value),
        None => default_render(value),
    }
}

/// The default rendering rule over type name and message.
///
/// With a message: `"<name> Error: <message>"` (the bare `"Error"` name is
/// not doubled). Without one: the raw type name, not the display name.
pub fn default_render(value: &dyn ErrorLike) -> String {
    render_parts(Some(value.type_name()), value.message())
}

pub(crate) fn render_parts(name: Option<&str>, message: &str) -> String {
    let display = match name {
        Some("Error") | None => "Error".to_string(),
        Some(n) => format!("{n} Error"),
    };
    if message.is_empty() {
        name.unwrap_or("Error").to_string()
    } else {
        format!("{display}: {message}")
    }
}
