//! Error rendering using miette
//!
//! Renders Rudi errors as diagnostic reports: the message, the diagnostic
//! code and, where there is one, a help line.

use crate::Error;
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::io::Write;

/// Render an error with full formatting to stderr
///
/// # Example
/// ```no_run
/// use rudi::{Engine, EngineOptions, Program, Value, Variables, render_error};
///
/// let engine = Engine::new(EngineOptions::default(), |_| {}).unwrap();
/// let program = Program::default();
/// if let Err(e) = engine.run(&program, Value::Null, Variables::new()) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to(error, &mut std::io::stderr()).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    writer.write_all(render(error, GraphicalTheme::unicode()).as_bytes())
}

/// Render an error to a String (useful for logs and web UIs)
pub fn render_error_to_string(error: &Error) -> String {
    render(error, GraphicalTheme::unicode())
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    render(error, GraphicalTheme::unicode_nocolor())
}

fn render(error: &Error, theme: GraphicalTheme) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(theme);
    if handler.render_report(&mut out, error).is_err() {
        // Fall back to the plain message.
        out = format!("{}\n", error);
    }
    out
}
