//! Two-namespace template formatter
//!
//! Templates use a subset of the `printf`-style grammar of
//! `java.util.Formatter`:
//!
//! ```text
//! %[index$ | <][flags][width][.precision]conversion[*]
//! ```
//!
//! A trailing `*` moves the placeholder into the engine namespace (subject
//! display, then step parameters). Without it the placeholder addresses the
//! caller's arguments. Each namespace keeps its own ordinary-index cursor
//! and its own `%<` memory.
//!
//! Flags: `-` left-justify, `+` always sign, space for a leading blank on
//! positives, `0` zero padding, `,` locale grouping. Conversions: `s S`
//! (display form), `d` (integer), `x X` (hex), `f` (fixed), `e E`
//! (scientific), `b B` (boolean), `c C` (character), `n` (newline) and `%`.

use crate::assertions::date::CalendarField;
use crate::error::{FormatError, Namespace};
use crate::locale::Locale;
use crate::parameter::{ParamValue, ParameterRecord, SemanticType};

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    group: bool,
}

#[derive(Debug, Clone, Copy)]
enum Index {
    Next,
    Explicit(usize),
    Previous,
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    index: Index,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
    namespace: Namespace,
}

#[derive(Debug)]
enum Piece<'a> {
    Text(&'a str),
    Arg(Placeholder),
    Newline,
    Percent,
}

/// Format `template` against both argument lists.
///
/// # Example
///
/// ```rust
/// use tidemark::locale::Locale;
/// use tidemark::message::format;
/// use tidemark::ParameterRecord;
///
/// let user = [ParameterRecord::new("0")];
/// let engine = [ParameterRecord::new("2"), ParameterRecord::new("1")];
/// let text = format("error1 %1$s* %s %2$s*", &user, &engine, &Locale::root()).unwrap();
/// assert_eq!(text, "error1 2 0 1");
/// ```
pub fn format(
    template: &str,
    user: &[ParameterRecord],
    engine: &[ParameterRecord],
    locale: &Locale,
) -> Result<String, FormatError> {
    let pieces = parse(template)?;
    let mut out = String::with_capacity(template.len());
    let mut cursor = [0usize; 2];
    let mut previous: [Option<usize>; 2] = [None, None];

    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Newline => out.push('\n'),
            Piece::Percent => out.push('%'),
            Piece::Arg(placeholder) => {
                let namespace = placeholder.namespace;
                let slot = match namespace {
                    Namespace::User => 0,
                    Namespace::Engine => 1,
                };
                let args = match namespace {
                    Namespace::User => user,
                    Namespace::Engine => engine,
                };
                let position = match placeholder.index {
                    Index::Next => {
                        cursor[slot] += 1;
                        cursor[slot]
                    }
                    Index::Explicit(n) => n,
                    Index::Previous => {
                        previous[slot].ok_or(FormatError::NoPreviousArgument(namespace))?
                    }
                };
                let record = args
                    .get(position - 1)
                    .ok_or(FormatError::MissingArgument {
                        namespace,
                        index: position,
                    })?;
                previous[slot] = Some(position);

                let rendered = convert(&placeholder, record, locale).ok_or(
                    FormatError::IncompatibleArgument {
                        conversion: placeholder.conversion,
                        namespace,
                        index: position,
                    },
                )?;
                out.push_str(&pad(&placeholder, rendered));
            }
        }
    }

    Ok(out)
}

fn parse(template: &str) -> Result<Vec<Piece<'_>>, FormatError> {
    let bytes = template.as_bytes();
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        if literal_start < i {
            pieces.push(Piece::Text(&template[literal_start..i]));
        }
        let (piece, next) = parse_placeholder(template, i)?;
        pieces.push(piece);
        i = next;
        literal_start = i;
    }
    if literal_start < bytes.len() {
        pieces.push(Piece::Text(&template[literal_start..]));
    }

    Ok(pieces)
}

fn scan_digits(bytes: &[u8], from: usize) -> usize {
    let mut end = from;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn parse_number(
    template: &str,
    from: usize,
    to: usize,
    start: usize,
) -> Result<usize, FormatError> {
    template[from..to]
        .parse()
        .map_err(|_| FormatError::Malformed(start))
}

fn parse_placeholder(template: &str, start: usize) -> Result<(Piece<'_>, usize), FormatError> {
    let bytes = template.as_bytes();
    let mut i = start + 1;

    let mut index = Index::Next;
    if bytes.get(i) == Some(&b'<') {
        index = Index::Previous;
        i += 1;
    } else {
        let end = scan_digits(bytes, i);
        if end > i && bytes.get(end) == Some(&b'$') {
            let n = parse_number(template, i, end, start)?;
            if n == 0 {
                return Err(FormatError::Malformed(start));
            }
            index = Index::Explicit(n);
            i = end + 1;
        }
    }

    let mut flags = Flags::default();
    while let Some(&b) = bytes.get(i) {
        match b {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'0' => flags.zero = true,
            b',' => flags.group = true,
            _ => break,
        }
        i += 1;
    }

    let end = scan_digits(bytes, i);
    let width = if end > i {
        Some(parse_number(template, i, end, start)?)
    } else {
        None
    };
    i = end;

    let mut precision = None;
    if bytes.get(i) == Some(&b'.') {
        let end = scan_digits(bytes, i + 1);
        if end == i + 1 {
            return Err(FormatError::Malformed(start));
        }
        precision = Some(parse_number(template, i + 1, end, start)?);
        i = end;
    }

    let conversion = template[i..]
        .chars()
        .next()
        .ok_or(FormatError::Malformed(start))?;
    i += conversion.len_utf8();

    match conversion {
        '%' => return Ok((Piece::Percent, i)),
        'n' => return Ok((Piece::Newline, i)),
        's' | 'S' | 'd' | 'x' | 'X' | 'f' | 'e' | 'E' | 'b' | 'B' | 'c' | 'C' => {}
        other => return Err(FormatError::UnknownConversion(other)),
    }

    let namespace = if bytes.get(i) == Some(&b'*') {
        i += 1;
        Namespace::Engine
    } else {
        Namespace::User
    };

    Ok((
        Piece::Arg(Placeholder {
            index,
            flags,
            width,
            precision,
            conversion,
            namespace,
        }),
        i,
    ))
}

fn convert(placeholder: &Placeholder, record: &ParameterRecord, locale: &Locale) -> Option<String> {
    let value = record.value();
    let flags = &placeholder.flags;
    let upper = placeholder.conversion.is_ascii_uppercase();

    let text = match placeholder.conversion {
        's' | 'S' => truncate(display(record, locale), placeholder.precision),
        'b' | 'B' => {
            let truth = match value {
                ParamValue::Null => false,
                ParamValue::Bool(b) => *b,
                _ => true,
            };
            truncate(truth.to_string(), placeholder.precision)
        }
        'c' | 'C' => match value {
            ParamValue::Null => "null".to_string(),
            ParamValue::Char(c) => c.to_string(),
            ParamValue::Int(i) => char::from_u32(u32::try_from(*i).ok()?)?.to_string(),
            ParamValue::UInt(u) => char::from_u32(u32::try_from(*u).ok()?)?.to_string(),
            _ => return None,
        },
        'd' => match value {
            ParamValue::Null => "null".to_string(),
            ParamValue::Int(i) => {
                let digits = group(&i.unsigned_abs().to_string(), flags, locale);
                signed(i.is_negative(), digits, placeholder, flags)
            }
            ParamValue::UInt(u) => {
                signed(false, group(&u.to_string(), flags, locale), placeholder, flags)
            }
            _ => return None,
        },
        'x' | 'X' => match value {
            ParamValue::Null => "null".to_string(),
            ParamValue::Int(i) if *i < 0 => format!("-{:x}", i.unsigned_abs()),
            ParamValue::Int(i) => format!("{:x}", i),
            ParamValue::UInt(u) => format!("{:x}", u),
            _ => return None,
        },
        'f' | 'e' | 'E' => {
            let number = match value {
                ParamValue::Null => return Some("null".to_string()),
                ParamValue::Float(f) => *f,
                ParamValue::Int(i) => *i as f64,
                ParamValue::UInt(u) => *u as f64,
                _ => return None,
            };
            if number.is_nan() {
                "NaN".to_string()
            } else if number.is_infinite() {
                let body = if number > 0.0 { "Infinity" } else { "-Infinity" };
                body.to_string()
            } else if placeholder.conversion == 'f' {
                let fixed = format!("{:.*}", placeholder.precision.unwrap_or(6), number.abs());
                let (integral, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
                let mut body = group(integral, flags, locale);
                if !fraction.is_empty() {
                    body.push(locale.decimal_separator());
                    body.push_str(fraction);
                }
                signed(number.is_sign_negative(), body, placeholder, flags)
            } else {
                let precision = placeholder.precision.unwrap_or(6);
                let scientific = format!("{:.*e}", precision, number.abs());
                let (mantissa, exponent) = scientific.split_once('e')?;
                let exponent: i32 = exponent.parse().ok()?;
                let mantissa = mantissa.replace('.', &locale.decimal_separator().to_string());
                let sign = if exponent < 0 { '-' } else { '+' };
                let body = format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
                signed(number.is_sign_negative(), body, placeholder, flags)
            }
        }
        _ => return None,
    };

    Some(if upper { text.to_uppercase() } else { text })
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(max) => text.chars().take(max).collect(),
        None => text,
    }
}

fn group(digits: &str, flags: &Flags, locale: &Locale) -> String {
    if !flags.group || digits.len() <= 3 {
        return digits.to_string();
    }
    let separator = locale.grouping_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

fn signed(negative: bool, body: String, placeholder: &Placeholder, flags: &Flags) -> String {
    let sign = if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    };

    match placeholder.width {
        Some(width) if flags.zero && !flags.left => {
            let len = sign.chars().count() + body.chars().count();
            let zeros = "0".repeat(width.saturating_sub(len));
            format!("{}{}{}", sign, zeros, body)
        }
        _ => format!("{}{}", sign, body),
    }
}

fn pad(placeholder: &Placeholder, text: String) -> String {
    let Some(width) = placeholder.width else {
        return text;
    };
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = " ".repeat(width - len);
    if placeholder.flags.left {
        text + &fill
    } else {
        fill + &text
    }
}

/// Display form of a record, as rendered by `%s`.
pub(crate) fn display(record: &ParameterRecord, locale: &Locale) -> String {
    if !record.is_displayable() {
        return display_value(&ParamValue::Opaque(opaque_name(record.value())), locale);
    }
    if record.semantic() == SemanticType::CalendarField {
        let field = match record.value() {
            ParamValue::Int(i) => usize::try_from(*i).ok().and_then(CalendarField::from_index),
            ParamValue::UInt(u) => usize::try_from(*u).ok().and_then(CalendarField::from_index),
            _ => None,
        };
        if let Some(field) = field {
            return field.name().to_string();
        }
    }
    display_value(record.value(), locale)
}

fn opaque_name(value: &ParamValue) -> &'static str {
    match value {
        ParamValue::Opaque(name) => name,
        _ => "hidden",
    }
}

/// Plain notation between `1e-3` and `1e7`, `1.0E7` style outside it.
fn float_display(value: f64) -> String {
    let magnitude = value.abs();
    if !value.is_finite() {
        return value.to_string();
    }
    if value != 0.0 && !(1e-3..1e7).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if mantissa.contains('.') => {
                format!("{}E{}", mantissa, exponent)
            }
            Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
            None => scientific,
        };
    }
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Display form of a value, as rendered by `%s`.
pub fn display_value(value: &ParamValue, locale: &Locale) -> String {
    match value {
        ParamValue::Null => "null".to_string(),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Int(i) => i.to_string(),
        ParamValue::UInt(u) => u.to_string(),
        ParamValue::Float(f) => float_display(*f),
        ParamValue::Char(c) => c.to_string(),
        ParamValue::Text(text) => text.clone(),
        ParamValue::Date(date) => date.format(locale.date_pattern()).to_string(),
        ParamValue::DateTime(date_time) => {
            date_time.format(&locale.date_time_pattern()).to_string()
        }
        ParamValue::Duration(duration) => duration.to_string(),
        ParamValue::List(items) => {
            let inner: Vec<String> = items.iter().map(|item| display_value(item, locale)).collect();
            format!("[{}]", inner.join(", "))
        }
        ParamValue::Entries(entries) => {
            let inner: Vec<String> = entries
                .iter()
                .map(|(k, v)| {
                    format!("{}={}", display_value(k, locale), display_value(v, locale))
                })
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        ParamValue::Opaque(name) => format!("<{}>", name),
    }
}
