use url::Url;

/// Parse `raw` as a link the client may open: scheme exactly `https` and a
/// non-empty host.
pub fn parse_navigable_link(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    if url.scheme() != "https" {
        return None;
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

pub fn is_navigable_link(raw: &str) -> bool {
    parse_navigable_link(raw).is_some()
}
