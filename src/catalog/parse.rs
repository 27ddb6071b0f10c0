//! Defensive parsers for the display strings shown on course cards.
//!
//! Cards carry formatted values ("Rp 300K", "4.2 (124)", "6 jam"); the
//! in-memory filter has to recover numbers from them without panicking on
//! whatever shape a card happens to have.

/// Parse a price display string into rupiah.
///
/// Accepts `Rp 300K`, `300K`, `300.000`, `300,000` and plain numbers. A
/// trailing `K`/`k` multiplies by 1000. Returns `None` when no number can
/// be recovered.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || matches!(c, 'k' | 'K'))
        .collect();
    let cleaned = cleaned.trim_matches('.');

    if let Some(thousands) = cleaned.strip_suffix(['k', 'K']) {
        return thousands
            .replace('.', "")
            .parse::<f64>()
            .ok()
            .map(|v| v * 1000.0);
    }

    // "300.000" is a thousands separator, "0.01" is a decimal point.
    let looks_separated = cleaned
        .split('.')
        .skip(1)
        .all(|group| group.len() == 3)
        && cleaned.contains('.');
    if looks_separated {
        cleaned.replace('.', "").parse().ok()
    } else {
        cleaned.parse().ok()
    }
}

/// Parse the leading decimal out of a composite rating string like `4.2 (124)`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let lead: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    lead.parse().ok()
}

/// Parse the leading number out of a duration string like `6 jam`.
pub fn parse_duration(raw: &str) -> Option<f64> {
    parse_rating(raw)
}
