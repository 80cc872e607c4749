use std::borrow::Cow;

/// Redact credentials from a database URL so it can be logged.
///
/// URLs without a userinfo part are returned borrowed; anything that does not
/// look like a URL is replaced wholesale.
pub fn sanitize_database_url(raw: &str) -> Cow<'_, str> {
    if raw.starts_with("sqlite:") {
        return Cow::Borrowed(raw);
    }
    let Some(scheme_end) = raw.find("://") else {
        return Cow::Borrowed("<redacted>");
    };
    let rest = &raw[scheme_end + 3..];

    let host_end = rest.find('/').unwrap_or(rest.len());
    let authority = &rest[..host_end];

    match authority.rfind('@') {
        Some(at_pos) => {
            let scheme = &raw[..scheme_end + 3];
            let host_and_rest = &rest[at_pos + 1..];
            let mut result = String::with_capacity(scheme.len() + 10 + host_and_rest.len());
            result.push_str(scheme);
            result.push_str("****:****@");
            result.push_str(host_and_rest);
            Cow::Owned(result)
        }
        None => Cow::Borrowed(raw),
    }
}
