//! Response security headers.
//!
//! Every response carries a Content-Security-Policy plus the sniffing and
//! framing opt-outs. A lead-gen page is a phishing target; the policy
//! keeps injected markup from loading outside scripts or posting the
//! quote form anywhere but here.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// `img-src` admits https so CMS-hosted share images load; the shell's
/// inline stylesheet needs `style-src 'unsafe-inline'`.
const CSP: &str = concat!(
    "default-src 'self'; ",
    "script-src 'self'; ",
    "style-src 'self' 'unsafe-inline'; ",
    "font-src 'self' data:; ",
    "img-src 'self' data: https:; ",
    "connect-src 'self'; ",
    "form-action 'self'; ",
    "frame-ancestors 'none'",
);

fn override_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Layer setting `Content-Security-Policy`.
pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    override_header("content-security-policy", CSP)
}

/// Layer setting `X-Content-Type-Options: nosniff`.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    override_header("x-content-type-options", "nosniff")
}

/// Layer setting `X-Frame-Options: DENY`.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    override_header("x-frame-options", "DENY")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_locks_down_sources() {
        assert!(CSP.contains("default-src 'self'"));
        assert!(CSP.contains("script-src 'self'"));
        assert!(CSP.contains("img-src 'self' data: https:"));
        assert!(CSP.contains("form-action 'self'"));
        assert!(CSP.contains("frame-ancestors 'none'"));
    }
}
