//! String literal escapes.
//!
//! Recognized: `\n`, `\r`, `\t`, `\\`, `\"`, `\'`, `\0`. Anything else is
//! kept literally, backslash included.

fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Value of a string literal given its body without the quotes.
pub(crate) fn unescape_string(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some(esc) => match resolve_escape(esc) {
                Some(resolved) => value.push(resolved),
                None => {
                    value.push('\\');
                    value.push(esc);
                }
            },
            None => value.push('\\'),
        }
    }
    value
}
