//! Transport and response-header security posture

use crate::fetch::{AuditRequest, FetchResult};
use crate::types::SecurityMetrics;
use tracing::debug;

pub fn extract_security(request: &AuditRequest, fetch: &FetchResult) -> SecurityMetrics {
    let present = |name: &str| {
        fetch
            .header(name)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
    };

    let metrics = SecurityMetrics {
        is_https: request.is_https(),
        has_hsts: present("strict-transport-security"),
        has_xss_protection: present("x-xss-protection"),
        has_frame_options: present("x-frame-options"),
        has_nosniff: fetch
            .header("x-content-type-options")
            .map(|value| value.trim().eq_ignore_ascii_case("nosniff"))
            .unwrap_or(false),
        has_cors: present("access-control-allow-origin"),
    };

    debug!("Security: {:?}", metrics);
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_without_headers() {
        let request = AuditRequest::new("https://example.com", 1000).unwrap();
        let metrics = extract_security(&request, &FetchResult::ok("", 1));
        assert!(metrics.is_https);
        assert!(!metrics.has_hsts);
        assert!(!metrics.has_xss_protection);
        assert!(!metrics.has_frame_options);
        assert!(!metrics.has_nosniff);
        assert!(!metrics.has_cors);
    }

    #[test]
    fn test_all_headers_present() {
        let request = AuditRequest::new("http://example.com", 1000).unwrap();
        let fetch = FetchResult::ok("", 1)
            .with_header("Strict-Transport-Security", "max-age=31536000")
            .with_header("X-XSS-Protection", "1; mode=block")
            .with_header("X-Frame-Options", "SAMEORIGIN")
            .with_header("X-Content-Type-Options", "NoSniff")
            .with_header("Access-Control-Allow-Origin", "*");
        let metrics = extract_security(&request, &fetch);
        assert!(!metrics.is_https);
        assert!(metrics.has_hsts);
        assert!(metrics.has_xss_protection);
        assert!(metrics.has_frame_options);
        assert!(metrics.has_nosniff);
        assert!(metrics.has_cors);
    }

    #[test]
    fn test_nosniff_requires_exact_value_and_blank_headers_do_not_count() {
        let request = AuditRequest::new("https://example.com", 1000).unwrap();
        let fetch = FetchResult::ok("", 1)
            .with_header("x-content-type-options", "sniff-away")
            .with_header("x-frame-options", "  ");
        let metrics = extract_security(&request, &fetch);
        assert!(!metrics.has_nosniff);
        assert!(!metrics.has_frame_options);
    }
}
