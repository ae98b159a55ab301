use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Spinner shown while a long-running external command is in progress.
pub fn get_spinner_style() -> ProgressStyle {
    let style = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]");

    let style = match style {
        Ok(s) => s,
        Err(_) => ProgressStyle::default_spinner(),
    };

    style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
}

/// Attach a spinner with `message` to `span`. It disappears when the span closes.
pub fn start_spinner(span: &Span, message: &str) {
    span.pb_set_style(&get_spinner_style());
    span.pb_set_message(message);
    span.pb_start();
}
