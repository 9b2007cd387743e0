/// Format elapsed seconds as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits and widen past 99.
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
