use std::borrow::Cow;

use serde_json::{Number, Value};

/// Shown for timestamps that are missing or `null`.
pub const DATE_PLACEHOLDER: &str = "-";

static EMPTY_STRING: Value = Value::String(String::new());

/// Own-key lookup on a JSON container.
///
/// Objects look the key up directly. Arrays expose their indices as keys, so
/// `"2"` on an array is its third element. Scalars and `null` have no keys,
/// strings included: their characters are not fields.
pub fn field<'a>(container: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    match container? {
        Value::Object(map) => map.get(key),
        Value::Array(items) => array_index(key).and_then(|index| items.get(index)),
        _ => None,
    }
}

fn array_index(key: &str) -> Option<usize> {
    // Only canonical indices count: "01" and "+1" are not keys of an array.
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if !canonical {
        return None;
    }
    key.parse().ok()
}

pub fn has_value(container: Option<&Value>, key: &str) -> bool {
    field(container, key).is_some()
}

/// Value stored under `key`, or `default` when the container is absent or lacks the key.
///
/// A key that is present with a `null` value is returned as `null`.
pub fn get_value<'a>(container: Option<&'a Value>, key: &str, default: &'a Value) -> &'a Value {
    field(container, key).unwrap_or(default)
}

/// [`get_value`] with the empty string as default.
pub fn get_value_or_empty<'a>(container: Option<&'a Value>, key: &str) -> &'a Value {
    get_value(container, key, &EMPTY_STRING)
}

/// Display text of a timestamp field; missing and `null` both yield [`DATE_PLACEHOLDER`].
pub fn get_date_value<'a>(container: Option<&'a Value>, key: &str) -> Cow<'a, str> {
    date_field(container, key).unwrap_or(Cow::Borrowed(DATE_PLACEHOLDER))
}

pub(crate) fn date_field<'a>(container: Option<&'a Value>, key: &str) -> Option<Cow<'a, str>> {
    field(container, key)
        .filter(|value| !value.is_null())
        .map(display_value)
}

/// Values of an array, or of an object in key order. Anything else has none.
pub fn members(container: Option<&Value>) -> Box<dyn Iterator<Item = &Value> + '_> {
    match container {
        Some(Value::Array(items)) => Box::new(items.iter()),
        Some(Value::Object(map)) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

/// Text a value contributes when concatenated into markup.
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        Value::Number(number) => Cow::Owned(display_number(number)),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Null => Cow::Borrowed("null"),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

fn display_number(number: &Number) -> String {
    // 12.0 reads as "12", the same as an integer 12.
    if number.is_f64()
        && let Some(float) = number.as_f64()
        && float.fract() == 0.0
        && float.abs() < 1e15
    {
        return (float as i64).to_string();
    }
    number.to_string()
}

/// Leading integer of the value's text, `0` when there is none.
///
/// `"12"`, `" 12"`, `"12abc"` and `12.7` all give 12; `"abc"`, `""` and `null` give 0.
/// Digit runs beyond the `i64` range saturate.
pub fn parse_int_lenient(value: &Value) -> i64 {
    let text = display_value(value);
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_owned()
    };
    // Only overflow can fail here: `digits` is a non-empty run of ASCII digits.
    signed.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|float| float != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric reading of a JSON number or a numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|float| float.is_finite()),
        _ => None,
    }
}

/// Fixed two-decimal rendering used for distance and speed.
///
/// Rounds the exact binary value half away from zero, so `0.125` gives `"0.13"`
/// where `{:.2}` would round the tie to even.
pub fn format_fixed2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_owned();
    }

    // Every finite f64 has at most 1074 fractional digits, so this expansion is exact.
    let exact = format!("{:.1100}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits: Vec<u8> = whole.bytes().chain(fraction.bytes().take(2)).collect();
    if fraction.as_bytes().get(2).is_some_and(|digit| *digit >= b'5') {
        round_up_last_digit(&mut digits);
    }

    let split = digits.len() - 2;
    let mut text = String::with_capacity(digits.len() + 2);
    // A negative zero prints without a sign.
    if value < 0.0 {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|&digit| char::from(digit)));
    text.push('.');
    text.extend(digits[split..].iter().map(|&digit| char::from(digit)));
    text
}

fn round_up_last_digit(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
