use crate::error::{GroupError, ParseFailure};

/// Split a raw line into optional numeric fields.
///
/// Trailing empty tokens are kept, so `"1";` has two fields. An empty token
/// and an empty quoted token (`""`) both yield `None`.
pub fn parse_line(line: &str, delimiter: char) -> Result<Vec<Option<f64>>, GroupError> {
    line.split(delimiter)
        .enumerate()
        .map(|(column, token)| {
            parse_token(column, token).map_err(|reason| GroupError::Parse {
                line: line.to_string(),
                reason,
            })
        })
        .collect()
}

fn parse_token(column: usize, token: &str) -> Result<Option<f64>, ParseFailure> {
    if token.is_empty() {
        return Ok(None);
    }
    if token.chars().nth(1).is_none() {
        return Err(ParseFailure::TooShort { column, token: token.to_string() });
    }

    let body = token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| ParseFailure::Unquoted { column, token: token.to_string() })?;

    if body.is_empty() {
        return Ok(None);
    }

    parse_number(body)
        .map(Some)
        .ok_or_else(|| ParseFailure::NotNumeric { column, token: token.to_string() })
}

/// Parse a floating-point literal.
///
/// Surrounding whitespace and control characters are ignored. Accepted forms,
/// each with an optional sign: `NaN` and `Infinity` spelled exactly, decimal
/// numbers (`12`, `.5`, `1.e3`), and hex numbers with a binary exponent
/// (`0x1.8p3`). Decimal and hex forms may end in one `d`, `D`, `f` or `F`.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c <= ' ');
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = match unsigned {
        "NaN" => return Some(f64::NAN),
        "Infinity" => f64::INFINITY,
        _ => {
            let literal = unsigned
                .strip_suffix(|c: char| matches!(c, 'd' | 'D' | 'f' | 'F'))
                .unwrap_or(unsigned);
            match literal.strip_prefix("0x").or_else(|| literal.strip_prefix("0X")) {
                Some(hex) => parse_hex(hex)?,
                None if is_decimal(literal) => literal.parse::<f64>().ok()?,
                None => return None,
            }
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// `digits [. digits] [(e|E) [sign] digits]` with at least one mantissa digit.
fn is_decimal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let int_end = skip_digits(bytes, 0);
    let mut i = int_end;
    let mut mantissa_digits = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = skip_digits(bytes, i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = skip_digits(bytes, i);
        if exp_end == i {
            return false;
        }
        i = exp_end;
    }
    i == bytes.len()
}

/// Body of a hex literal after `0x`: `hexdigits [. hexdigits] (p|P) [sign] digits`.
fn parse_hex(text: &str) -> Option<f64> {
    let (mantissa, exponent) = text.split_once(|c: char| matches!(c, 'p' | 'P'))?;
    let exponent = parse_exponent(exponent)?;
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }

    // Keep 60 significant bits; anything below only decides rounding.
    let mut bits: u64 = 0;
    let mut scale: i64 = 0;
    let mut sticky = false;
    for (c, fractional) in int.chars().map(|c| (c, false)).chain(frac.chars().map(|c| (c, true))) {
        let digit = u64::from(c.to_digit(16)?);
        if bits < 1 << 60 {
            bits = bits * 16 + digit;
            if fractional {
                scale -= 4;
            }
        } else {
            sticky |= digit != 0;
            if !fractional {
                scale += 4;
            }
        }
    }
    if sticky {
        bits |= 1;
    }

    let mut power = (exponent + scale).clamp(-3000, 3000);
    let mut value = bits as f64;
    while power > 1000 {
        value *= 2f64.powi(1000);
        power -= 1000;
    }
    while power < -1000 {
        value *= 2f64.powi(-1000);
        power += 1000;
    }
    Some(value * 2f64.powi(power as i32))
}

/// Signed decimal exponent, saturated well past the `f64` range.
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(100_000));
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: Result<Vec<Option<f64>>, GroupError>) -> ParseFailure {
        match result {
            Err(GroupError::Parse { reason, .. }) => reason,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn quoted_numbers() {
        let fields = parse_line(r#""1";"2.5";"-3""#, ';').unwrap();
        assert_eq!(fields, vec![Some(1.0), Some(2.5), Some(-3.0)]);
    }

    #[test]
    fn empty_and_null_tokens() {
        let fields = parse_line(r#""5";"";;"7""#, ';').unwrap();
        assert_eq!(fields, vec![Some(5.0), None, None, Some(7.0)]);
    }

    #[test]
    fn trailing_empty_tokens_kept() {
        let fields = parse_line(r#""5";"#, ';').unwrap();
        assert_eq!(fields, vec![Some(5.0), None]);
        assert_eq!(parse_line("", ';').unwrap(), vec![None]);
    }

    #[test]
    fn custom_delimiter() {
        let fields = parse_line(r#""1","2""#, ',').unwrap();
        assert_eq!(fields, vec![Some(1.0), Some(2.0)]);
        // Semicolons are just text under another delimiter
        assert!(parse_line(r#""1";"2""#, ',').is_err());
    }

    #[test]
    fn missing_closing_quote_rejected() {
        let r = reason(parse_line(r#""5;6"#, ';'));
        assert_eq!(r, ParseFailure::Unquoted { column: 0, token: "\"5".into() });
        let r = reason(parse_line(r#""5";6"#, ';'));
        assert_eq!(r, ParseFailure::TooShort { column: 1, token: "6".into() });
        let r = reason(parse_line(r#"""#, ';'));
        assert_eq!(r, ParseFailure::TooShort { column: 0, token: "\"".into() });
    }

    #[test]
    fn single_char_token_is_too_short() {
        let r = reason(parse_line(r#""1";7"#, ';'));
        assert_eq!(r, ParseFailure::TooShort { column: 1, token: "7".into() });
    }

    #[test]
    fn unquoted_token_rejected() {
        let r = reason(parse_line(r#""1";42"#, ';'));
        assert_eq!(r, ParseFailure::Unquoted { column: 1, token: "42".into() });
    }

    #[test]
    fn non_numeric_body_rejected() {
        let r = reason(parse_line(r#""1";"abc""#, ';'));
        assert_eq!(r, ParseFailure::NotNumeric { column: 1, token: "\"abc\"".into() });
        let r = reason(parse_line(r#""  ""#, ';'));
        assert!(matches!(r, ParseFailure::NotNumeric { column: 0, .. }));
    }

    #[test]
    fn error_carries_offending_line() {
        match parse_line(r#""1";"x""#, ';') {
            Err(GroupError::Parse { line, .. }) => assert_eq!(line, r#""1";"x""#),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn body_whitespace_and_exponents() {
        let fields = parse_line(r#"" 12 ";"1e3";"0.5""#, ';').unwrap();
        assert_eq!(fields, vec![Some(12.0), Some(1000.0), Some(0.5)]);
    }

    #[test]
    fn type_suffixes_accepted() {
        let fields = parse_line(r#""1d";"1.0f";"2D";"3F";"1e2d";".5f""#, ';').unwrap();
        assert_eq!(
            fields,
            vec![Some(1.0), Some(1.0), Some(2.0), Some(3.0), Some(100.0), Some(0.5)]
        );
        assert!(parse_line(r#""1dd""#, ';').is_err());
        assert!(parse_line(r#""d""#, ';').is_err());
    }

    #[test]
    fn hex_literals_accepted() {
        let fields = parse_line(r#""0x1p3";"0x1.8p1";"-0X.8p0";"0x10P-4d""#, ';').unwrap();
        assert_eq!(fields, vec![Some(8.0), Some(3.0), Some(-0.5), Some(1.0)]);
        assert_eq!(parse_number("0x1p-1074"), Some(f64::from_bits(1)));
        assert_eq!(parse_number("0x1p99999"), Some(f64::INFINITY));
        assert_eq!(parse_number("0x1"), None);
        assert_eq!(parse_number("0xp3"), None);
        assert_eq!(parse_number("0x1g2p0"), None);
    }

    #[test]
    fn special_values_need_exact_spelling() {
        let fields = parse_line(r#""Infinity";"-Infinity";"+Infinity""#, ';').unwrap();
        assert_eq!(
            fields,
            vec![Some(f64::INFINITY), Some(f64::NEG_INFINITY), Some(f64::INFINITY)]
        );
        assert!(parse_number("NaN").is_some_and(f64::is_nan));
        assert_eq!(
            parse_number("-NaN").map(f64::to_bits),
            Some(f64::NAN.to_bits())
        );
        for rejected in ["inf", "infinity", "Inf", "nan", "NAN", "Infinityd", "NaNf"] {
            assert_eq!(parse_number(rejected), None, "{rejected}");
        }
    }

    #[test]
    fn malformed_decimals_rejected() {
        for rejected in ["", "-", ".", "1e", "e5", "1e+", "1.2.3", "1_000", "--1", "1 2"] {
            assert_eq!(parse_number(rejected), None, "{rejected}");
        }
        assert_eq!(parse_number("\t5.\t"), Some(5.0));
        assert_eq!(parse_number("+1.e1"), Some(10.0));
    }
}
