//! Formatting utilities used for CLI output.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Long form of a minute count, e.g. `04h 05m`.
pub fn mins2readable(mins: i64) -> String {
    let m = mins.max(0);
    format!("{:02}h {:02}m", m / 60, m % 60)
}
