/// Format whole seconds as a zero-padded `MM:SS` countdown.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
