/// Round to an integer (ties to even) and group digits by thousands: `1234567.4` -> `"1,234,567"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    // -0 after rounding
    if digits == "0" {
        return "0".to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// One decimal place, no percent sign.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn format_count(count: usize) -> String {
    format_thousands(count as f64)
}
