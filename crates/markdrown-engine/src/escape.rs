//! HTML escaping.

/// Escape the HTML-sensitive characters `&`, `<`, `>` and `"`.
///
/// An ampersand that already starts a character reference (`&amp;`,
/// `&#39;`, `&#x2F;`) is kept as is, so escaping rendered output again
/// leaves its entities unchanged.
///
/// # Examples
///
/// ```
/// use markdrown_engine::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// assert_eq!(escape_html("a &amp; b"), "a &amp; b");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    escape(s, true)
}

/// Escape source text shown literally, such as code. Every `&` is escaped.
pub(crate) fn escape_code(s: &str) -> String {
    escape(s, false)
}

fn escape(s: &str, keep_references: bool) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '&' if keep_references && is_reference(&s[i + 1..]) => result.push('&'),
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Whether `rest`, the text after an `&`, starts with a decimal or
/// hexadecimal character reference, or a named reference from the HTML
/// entity table, terminated by `;`.
fn is_reference(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return (1..=6).contains(&hex.len()) && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    if let Some(digits) = body.strip_prefix('#') {
        return (1..=7).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
    }
    is_named_reference(body)
}

/// `name` is a known entity name. A fully decoded reference is one or two
/// characters; anything left over means only a legacy prefix like `&amp`
/// was recognized.
fn is_named_reference(name: &str) -> bool {
    if !(1..=32).contains(&name.len()) || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    let reference = format!("&{name};");
    let decoded = html_escape::decode_html_entities(&reference);
    decoded != reference.as_str() && decoded.chars().count() <= 2 && !decoded.ends_with(';')
}
