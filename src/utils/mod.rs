//! Text formatting helpers shared by the renderers.

/// Format an integer with thousands separators (12345 -> "12,345").
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Strip a display name down to printable ASCII.
///
/// Only the notification channel uses this; the document renderer keeps
/// names verbatim.
pub fn clean_ascii(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Cut a name down to the notification display budget: names longer than
/// `max` characters keep `max - 3` and gain a "..." marker.
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
