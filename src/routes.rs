use crate::{
    api::employee,
    auth::handlers,
    config::Config,
    error::{json_error_handler, path_error_handler, query_error_handler},
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

/// Per-IP limiter; `None` when the limit is 0 (disabled).
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}

/// Browser access policy; `*` in the list opens the API to every origin.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Extractor failures answer with the same 422 body as the handlers
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    let google_login = web::resource("/auth/google").route(web::post().to(handlers::google_login));

    let api = web::scope(&config.api_prefix)
        // /employees?email=
        .service(web::resource("/employees").route(web::get().to(employee::find_by_email)))
        // /employees/{id}/salary
        .service(
            web::resource("/employees/{id}/salary").route(web::get().to(employee::salary_history)),
        );

    // /auth/google, rate limited per client IP
    let api = match build_limiter(config.rate_login_per_min) {
        Some(limiter) => api.service(google_login.wrap(limiter)),
        None => api.service(google_login),
    };

    cfg.service(api);
}
