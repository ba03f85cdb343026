//! Formatting utilities used for CLI outputs.

/// Money with a dollar sign and 2 decimals.
pub fn money(v: f64) -> String {
    format!("${:.2}", v)
}

/// Horizontal rule made of the configured separator character.
pub fn separator(ch: &str, width: usize) -> String {
    let ch = ch.chars().next().unwrap_or('-');
    std::iter::repeat_n(ch, width).collect()
}
