use regex::Regex;
use std::sync::OnceLock;

fn redirect_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/l/\?(?:[^#]*&)?uddg=([^&#]*)").expect("valid redirect regex"))
}

fn tracking_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[?&](?:utm_[^&#]*|fbclid=[^&#]*|ref=[^&#]*)").expect("valid tracking regex")
    })
}

/// Turns a raw result href into a clean absolute URL.
///
/// Returns `None` when the href is a redirect wrapper whose target cannot be
/// recovered, or when the cleaned link is not an absolute http(s) URL.
pub fn normalize_link(href: &str) -> Option<String> {
    let href = href.trim();
    let mut link = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    if link.contains("/l/?") {
        let target = redirect_re().captures(&link)?.get(1)?.as_str();
        let decoded = urlencoding::decode(target).ok()?;
        let decoded = decoded.trim();
        if decoded.is_empty() {
            return None;
        }
        link = if decoded.starts_with("//") {
            format!("https:{decoded}")
        } else {
            decoded.to_string()
        };
    }

    let cleaned = tracking_re().replace_all(&link, "");
    let end = cleaned.find(&['?', '&', '#'][..]).unwrap_or(cleaned.len());
    let normalized = &cleaned[..end];

    if is_absolute_http(normalized) {
        Some(normalized.to_string())
    } else {
        None
    }
}

fn is_absolute_http(link: &str) -> bool {
    url::Url::parse(link)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// True when `link` points at `domain` or one of its subdomains.
pub fn is_on_domain(link: &str, domain: &str) -> bool {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .map(|host| host == domain || host.ends_with(&format!(".{domain}")))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_relative_is_made_absolute() {
        assert_eq!(
            normalize_link("//github.com/alice").as_deref(),
            Some("https://github.com/alice")
        );
    }

    #[test]
    fn test_redirect_wrapper_is_unwrapped() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.instagram.com%2Falice%2F%3Futm_source%3Dddg&rut=abc123";
        assert_eq!(
            normalize_link(href).as_deref(),
            Some("https://www.instagram.com/alice/")
        );

        let relative = "/l/?uddg=https%3A%2F%2Freddit.com%2Fu%2Falice";
        assert_eq!(
            normalize_link(relative).as_deref(),
            Some("https://reddit.com/u/alice")
        );
    }

    #[test]
    fn test_broken_redirect_wrapper_is_rejected() {
        assert_eq!(normalize_link("//duckduckgo.com/l/?rut=abc"), None);
        assert_eq!(normalize_link("/l/?uddg=&rut=abc"), None);
        assert_eq!(normalize_link("/l/?uddg=%FF%FE"), None);
    }

    #[test]
    fn test_tracking_parameters_are_stripped() {
        assert_eq!(
            normalize_link("https://example.com/page?utm_source=x&utm_medium=y").as_deref(),
            Some("https://example.com/page")
        );
        assert_eq!(
            normalize_link("https://facebook.com/alice?fbclid=AbC").as_deref(),
            Some("https://facebook.com/alice")
        );
        assert_eq!(
            normalize_link("https://example.com/p?ref=home#top").as_deref(),
            Some("https://example.com/p")
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let hrefs = [
            "//github.com/alice",
            "https://example.com/a?b=c#d",
            "//duckduckgo.com/l/?uddg=https%3A%2F%2Ft.me%2Falice&rut=1",
            "https://medium.com/@alice",
            "/l/?uddg=%20https%3A%2F%2Fexample.com%2Falice%20",
        ];
        for href in hrefs {
            let once = normalize_link(href).unwrap();
            assert_eq!(normalize_link(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_padded_redirect_target_is_trimmed() {
        assert_eq!(
            normalize_link("/l/?uddg=%20https%3A%2F%2Fexample.com%2Falice%20").as_deref(),
            Some("https://example.com/alice")
        );
    }

    #[test]
    fn test_relative_and_non_http_links_are_rejected() {
        assert_eq!(normalize_link("/html/?q=x"), None);
        assert_eq!(normalize_link("about:blank"), None);
        assert_eq!(normalize_link("javascript:void(0)"), None);
        assert_eq!(normalize_link("/l/?uddg=%2Fsettings"), None);
    }

    #[test]
    fn test_is_on_domain() {
        assert!(is_on_domain("https://duckduckgo.com/about", "duckduckgo.com"));
        assert!(is_on_domain("https://html.duckduckgo.com/html", "duckduckgo.com"));
        assert!(!is_on_domain("https://notduckduckgo.com/", "duckduckgo.com"));
        assert!(!is_on_domain("not a url", "duckduckgo.com"));
    }
}
