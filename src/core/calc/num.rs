use serde_json::Value;

/// Coerce a raw form value into a number, never failing.
///
/// Values arrive from form fields as strings, often with a comma decimal
/// separator ("2,5") or stray unit text ("250 cm"). The first comma becomes
/// a decimal point, every character that is not an ASCII digit or `.` is
/// dropped, and whatever remains is parsed as `f64`. Anything unparsable
/// comes back as 0. Note that the minus sign is stripped like any other
/// non-digit, so negative inputs coerce to their magnitude.
pub fn to_num_str(raw: &str) -> f64 {
    let cleaned: String = raw
        .replacen(',', ".", 1)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// [`to_num_str`] over an arbitrary JSON value.
pub fn to_num(value: &Value) -> f64 {
    match value {
        Value::String(s) => to_num_str(s),
        Value::Number(n) => {
            let f = n.as_f64().unwrap_or(0.0);
            if f.is_finite() { f.abs() } else { 0.0 }
        }
        // booleans stringify to "true"/"false", which strip to nothing
        _ => 0.0,
    }
}

/// Round a currency amount up to the next whole thousand.
///
/// This is a ceiling: 1 becomes 1000, never 0. Every displayed subtotal in
/// an offer goes through this, so quotes always end in whole thousands.
pub fn round_up_thousands(n: f64) -> f64 {
    let x = if n.is_finite() { n } else { 0.0 };
    (x / 1000.0).ceil() * 1000.0
}
