/// Human-readable formatting for byte counts and tallies.
///
/// All sizes are carried as `u64` bytes; floating point only appears here,
/// at the display boundary.

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a byte count with a binary (1024-based) unit.
///
/// Bytes are printed exactly; KB and MB get one decimal, GB and above two.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit < 2 {
        format!("{value:.1} {}", UNITS[unit])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Whole kibibytes, rounded down. Used for tabular report columns.
#[inline]
pub fn to_kib(bytes: u64) -> u64 {
    bytes / 1024
}

/// Format a count with comma thousand separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
