#![forbid(unsafe_code)]

const REDACTED: &str = "<redacted>";

const SENSITIVE_KEY_PARTS: [&str; 8] = [
    "token",
    "apikey",
    "api_key",
    "secret",
    "password",
    "private_key",
    "authorization",
    "bearer",
];

const QUERY_KEYS: [&str; 5] = ["token", "apikey", "api_key", "secret", "password"];

/// Known credential prefixes and the shortest tail that still looks like a real token.
const TOKEN_PREFIXES: [(&str, usize); 3] = [("ghp_", 20), ("github_pat_", 20), ("sk-", 20)];

pub(crate) fn redacted() -> &'static str {
    REDACTED
}

pub(crate) fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SENSITIVE_KEY_PARTS.iter().any(|part| lower.contains(part))
}

/// Masks credentials that commonly leak into command lines and URLs.
pub(crate) fn redact_text(text: &str) -> String {
    if text.contains("PRIVATE KEY") {
        return mask_private_key_block(text);
    }
    let mut out = text.to_string();
    for (prefix, min_tail) in TOKEN_PREFIXES {
        out = mask_prefixed_tokens(&out, prefix, min_tail);
    }
    for key in QUERY_KEYS {
        out = mask_after(&out, &format!("{key}="), |b| {
            b.is_ascii_whitespace() || b == b'&' || b == b';'
        });
    }
    mask_after(&out, "bearer ", |b| b.is_ascii_whitespace())
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn mask_prefixed_tokens(input: &str, prefix: &str, min_tail: usize) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(prefix) {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let end = candidate
            .bytes()
            .skip(prefix.len())
            .position(|b| !is_token_byte(b))
            .map(|n| n + prefix.len())
            .unwrap_or(candidate.len());
        if end - prefix.len() >= min_tail {
            out.push_str(REDACTED);
        } else {
            out.push_str(&candidate[..end]);
        }
        rest = &candidate[end..];
    }
    out.push_str(rest);
    out
}

/// Replaces whatever follows `needle` (ASCII case-insensitive) up to `stop`.
fn mask_after(input: &str, needle: &str, stop: impl Fn(u8) -> bool) -> String {
    let lower = input.to_ascii_lowercase();
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(found) = lower[cursor..].find(needle) {
        let value_start = cursor + found + needle.len();
        out.push_str(&input[cursor..value_start]);
        let value_end = input.as_bytes()[value_start..]
            .iter()
            .position(|b| stop(*b))
            .map(|n| value_start + n)
            .unwrap_or(input.len());
        out.push_str(REDACTED);
        cursor = value_end;
    }
    out.push_str(&input[cursor..]);
    out
}

fn mask_private_key_block(input: &str) -> String {
    let Some(start) = input.find("-----BEGIN ") else {
        return REDACTED.to_string();
    };
    let Some(end_marker) = input[start..].find("-----END ").map(|p| start + p) else {
        return REDACTED.to_string();
    };
    let end = input[end_marker + 5..]
        .find("-----")
        .map(|p| end_marker + 5 + p + 5)
        .unwrap_or(input.len());
    format!("{}{REDACTED}{}", &input[..start], &input[end..])
}
