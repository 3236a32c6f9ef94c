//! Indian-locale number formatting for report descriptions

/// Format an amount in rupees with lakh/crore digit grouping, e.g. `₹12,34,567`.
///
/// Amounts are rounded to whole rupees.
pub fn format_inr(amount: f64) -> String {
    format!("₹{}", group_indian(amount))
}

/// Group the integer part of `amount` the way `en-IN` does: the last three
/// digits, then pairs.
pub fn group_indian(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            parts.push(&head[end - 2..end]);
            end -= 2;
        }
        parts.push(&head[..end]);
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
