//! Click recorder: turns raw request signals into a structured click event.
//!
//! This is a pure transformation with no I/O. The classification rules are
//! substring heuristics over the user agent, best-effort rather than a full
//! UA grammar; they cover the dominant browser and OS families and bucket
//! everything else as "Other".

use crate::domain::entities::NewClick;

/// Maximum stored length for user agent and referrer strings.
const MAX_SIGNAL_LEN: usize = 500;

/// Raw identifying signals extracted from an inbound redirect request.
#[derive(Debug, Clone, Default)]
pub struct RequestSignals {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    /// Raw `X-Forwarded-For` header value, if present.
    pub forwarded_for: Option<String>,
    /// Peer socket address, used when no forwarded header is present.
    pub peer_ip: Option<String>,
}

/// Builds a persistable click event from request signals.
///
/// User agent and referrer are truncated to 500 characters; the network
/// address prefers the first comma-separated entry of the forwarded-for
/// header over the direct connection address.
pub fn build_click(link_id: i64, signals: &RequestSignals) -> NewClick {
    let ua = signals.user_agent.as_deref().unwrap_or("");

    NewClick {
        link_id,
        user_agent: signals.user_agent.as_deref().map(|s| truncate(s, MAX_SIGNAL_LEN)),
        referrer: signals.referrer.as_deref().map(|s| truncate(s, MAX_SIGNAL_LEN)),
        device_type: detect_device(ua).to_string(),
        browser: detect_browser(ua).to_string(),
        os: detect_os(ua).to_string(),
        ip: resolve_ip(signals.forwarded_for.as_deref(), signals.peer_ip.as_deref()),
    }
}

/// Prefers the first entry of a comma-separated forwarded-for list, falling
/// back to the peer address.
pub fn resolve_ip(forwarded_for: Option<&str>, peer_ip: Option<&str>) -> Option<String> {
    if let Some(forwarded) = forwarded_for {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    peer_ip.map(|s| s.to_string())
}

/// Classifies the device type from a user agent string.
pub fn detect_device(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();
    if ["mobile", "android", "iphone"].iter().any(|t| ua.contains(t)) {
        "mobile"
    } else if ua.contains("tablet") || ua.contains("ipad") {
        "tablet"
    } else {
        "desktop"
    }
}

/// Classifies the browser family from a user agent string.
///
/// "edg" is checked before "chrome" because Edge user agents also contain
/// the Chrome token.
pub fn detect_browser(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();
    if ua.contains("edg") {
        "Edge"
    } else if ua.contains("chrome") {
        "Chrome"
    } else if ua.contains("safari") {
        "Safari"
    } else if ua.contains("firefox") {
        "Firefox"
    } else {
        "Other"
    }
}

/// Classifies the operating system family from a user agent string.
///
/// Android tokens are checked before "linux" and iPhone/iPad tokens before
/// "mac": Android user agents contain "Linux" and iOS ones contain
/// "like Mac OS X".
pub fn detect_os(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();
    if ua.contains("windows") {
        "Windows"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
        "iOS"
    } else if ua.contains("mac") {
        "macOS"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        "Other"
    }
}

/// Truncates at a char boundary at or below `max` bytes.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
