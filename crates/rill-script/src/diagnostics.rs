use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::error::ScriptError;

/// Render a script error as an annotated report against the source text.
///
/// Syntax errors get an ariadne report pointing at the offending span;
/// errors without a span (for example an unknown level name) render as a
/// plain one-line message.
pub fn render_script_error(source: &str, filename: &str, error: &ScriptError) -> String {
    let Some(span) = error.span() else {
        return format!("error: {error}\n");
    };

    let mut output = Vec::new();
    Report::build(ReportKind::Error, (filename, span.clone()))
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut output)
        .ok();

    String::from_utf8(output).unwrap_or_default()
}
