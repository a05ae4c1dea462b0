use std::borrow::Cow;

/// Tokens some upstream serializers emit for non-finite floats. None of them is valid JSON.
const NON_FINITE_TOKENS: [&str; 4] = ["-Infinity", "+Infinity", "Infinity", "NaN"];

/// Rewrites bare `NaN`, `Infinity` and `-Infinity` tokens to `null`.
///
/// Text inside JSON strings is left alone. Returns the input unchanged (and
/// unallocated) when there is nothing to rewrite.
pub fn sanitize_non_finite(raw: &str) -> Cow<'_, str> {
    let mut output: Option<String> = None;
    let mut in_string = false;
    let mut escaped = false;
    let mut copied_up_to = 0;
    let mut i = 0;
    let bytes = raw.as_bytes();

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        // Compared as bytes: `i` may sit inside a multi-byte character.
        if let Some(token) = NON_FINITE_TOKENS
            .iter()
            .find(|t| bytes[i..].starts_with(t.as_bytes()))
        {
            let out = output.get_or_insert_with(|| String::with_capacity(raw.len()));
            out.push_str(&raw[copied_up_to..i]);
            out.push_str("null");
            i += token.len();
            copied_up_to = i;
            tracing::warn!(token, "Sanitizing invalid float value.");
            continue;
        }
        i += 1;
    }

    match output {
        Some(mut out) => {
            out.push_str(&raw[copied_up_to..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(raw),
    }
}
