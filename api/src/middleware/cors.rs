//! CORS configuration for the browser extension.
//!
//! Extension pages call the API from `chrome-extension://` and
//! `moz-extension://` origins. Production additionally admits the origins in
//! `ALLOWED_ORIGINS`; development accepts any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use ext_shared::config::{CorsConfig, Environment};

/// Origin schemes used by extension pages
const EXTENSION_SCHEMES: [&str; 2] = ["chrome-extension://", "moz-extension://"];

/// Creates a CORS middleware instance for `environment`
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn base_cors(config: &CorsConfig) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ])
        .max_age(config.max_age)
        // Issuance reads the web-session cookie
        .supports_credentials()
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for development environment");
    base_cors(config).allow_any_origin()
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let allowed = config.allowed_origins.clone();
    for origin in &allowed {
        log::info!("Adding allowed origin: {}", origin);
    }

    base_cors(config).allowed_origin_fn(move |origin, _req_head| {
        origin
            .to_str()
            .map(|origin| is_allowed_origin(origin, &allowed))
            .unwrap_or(false)
    })
}

/// Whether `origin` is an extension page or explicitly configured
pub fn is_allowed_origin(origin: &str, configured: &[String]) -> bool {
    EXTENSION_SCHEMES
        .iter()
        .any(|scheme| origin.len() > scheme.len() && origin.starts_with(scheme))
        || configured.iter().any(|allowed| allowed == origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_origins_allowed() {
        assert!(is_allowed_origin("chrome-extension://abcdefghijklmnop", &[]));
        assert!(is_allowed_origin("moz-extension://1234-5678", &[]));
        assert!(!is_allowed_origin("chrome-extension://", &[]));
        assert!(!is_allowed_origin("https://evil.example.com", &[]));
    }

    #[test]
    fn test_configured_origins_allowed() {
        let configured = vec!["https://app.renoveasy.com".to_string()];
        assert!(is_allowed_origin("https://app.renoveasy.com", &configured));
        assert!(!is_allowed_origin("https://app.renoveasy.com.evil.io", &configured));
    }

    #[test]
    fn test_create_cors_for_each_environment() {
        let config = CorsConfig::default();
        let _dev = create_cors(&config, Environment::Development);
        let _prod = create_cors(&config, Environment::Production);
    }
}
