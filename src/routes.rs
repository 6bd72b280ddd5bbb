use crate::{
    api::{attendance, health, stats},
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::Condition, web};
use std::sync::Arc;
use tracing::debug;

pub type ApiLimiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per peer IP limiter allowing `requests_per_min` with an equal burst.
pub fn build_limiter(requests_per_min: u32) -> Option<ApiLimiter> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}

/// Mounts the routes. `limiter` guards only the API scope; `None` leaves it
/// unlimited. The same `Arc` must be passed to every worker so they share
/// one quota.
pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiter: Option<Arc<ApiLimiter>>) {
    let limited = limiter.is_some();
    // Disabled through `Condition`; the scope is wrapped either way.
    let limiter =
        limiter.unwrap_or_else(|| Arc::new(Governor::new(&GovernorConfig::default())));

    // Extraction failures use the same {"error": ...} body as handler errors.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected request body");
        ApiError::validation(format!("Invalid JSON body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected path parameter");
        // Only the numeric record id can fail to parse, and no row matches it.
        ApiError::not_found("Record not found").into()
    }));

    cfg.service(health::index);

    cfg.service(
        web::scope(api_prefix)
            .wrap(Condition::new(limited, limiter))
            .route("/health", web::get().to(health::health))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::create_attendance)),
                    )
                    // /attendance/employee/{employee_id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::attendance_by_employee)),
                    )
                    // /attendance/date/{date}
                    .service(
                        web::resource("/date/{date}")
                            .route(web::get().to(attendance::attendance_by_date)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            )
            .service(
                web::scope("/stats")
                    .route("/dashboard", web::get().to(stats::dashboard))
                    .route("/monthly-trends", web::get().to(stats::monthly_trends)),
            ),
    );
}

/// Builds an `App` over the given store with the routes mounted at `/api`,
/// optionally behind a rate limiter.
#[cfg(test)]
#[macro_export]
macro_rules! test_app {
    ($store:expr) => {
        $crate::test_app!($store, None)
    };
    ($store:expr, $limiter:expr) => {{
        let store: std::sync::Arc<dyn $crate::store::AttendanceStore> = $store;
        let limiter: Option<std::sync::Arc<$crate::routes::ApiLimiter>> = $limiter;
        actix_web::App::new()
            .app_data(actix_web::web::Data::from(store))
            .configure(move |cfg| $crate::routes::configure(cfg, "/api", limiter))
    }};
}
