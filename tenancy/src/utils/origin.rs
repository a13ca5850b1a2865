use url::Url;

/// Path the identity provider sends users back to after sign-in
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";

/// Normalized origin of a site URL, ie: `https://example.com:8443`
pub fn origin_of(site_url: &str) -> Result<String, String> {
    let Ok(url) = Url::parse(site_url) else {
        return Err(format!("Invalid site url: {}", site_url));
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("Site url must be http or https: {}", site_url));
    }

    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(format!("Site url has no origin: {}", site_url));
    }

    Ok(origin.ascii_serialization())
}

/// OAuth redirect target for the given origin
pub fn callback_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), AUTH_CALLBACK_PATH)
}
