use tracing_subscriber::fmt::time::FormatTime;
use std::fmt;
use chrono::Local;

/// DateTime format for file logs (YYYY-MM-DD HH:MM:SS.mmmmmm+00:00)
pub struct LocalDateTime;

impl FormatTime for LocalDateTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.6f%:z"))
    }
}

/// Time-of-day format for console logs (HH:MM:SS.mmm)
pub struct LocalTimeOnly;

impl FormatTime for LocalTimeOnly {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}
