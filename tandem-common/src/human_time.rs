//! Clock-style time formatting
//!
//! Positions and track lengths are whole seconds; they are displayed as
//! `MM:SS` in log lines and the health endpoint.

/// Format whole seconds as `MM:SS`.
///
/// Minutes are not wrapped at 60, so long tracks stay readable without an
/// hours field.
///
/// # Examples
///
/// ```
/// use tandem_common::human_time::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(180), "03:00");
/// assert_eq!(format_clock(3725), "62:05");
/// ```
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", minutes, secs)
}
