const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable size with two decimals, stepping by 1024.
///
/// TB is the last unit, so anything past it keeps growing in TB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}
