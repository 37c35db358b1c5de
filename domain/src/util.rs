//! Small string helpers shared by the domain types.

/// Cut `s` to at most `max_bytes`, backing off to the previous UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Render an amount stored in cents as dollars, e.g. `15795` -> `$157.95`.
pub fn format_cents(cents: u64) -> String {
    let dollars = cents / 100;
    let rest = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}.{:02}", grouped, rest)
}
