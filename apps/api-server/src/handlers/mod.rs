//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Post routes - the feed is registered before the {id} routes
                .service(
                    web::scope("/posts")
                        .route("/", web::post().to(posts::create_post))
                        .route("/feed/", web::get().to(posts::feed))
                        .route("/{id}/detail/", web::get().to(posts::get_post))
                        .service(
                            web::resource("/{id}/")
                                .route(web::put().to(posts::update_post))
                                .route(web::delete().to(posts::delete_post)),
                        )
                        .service(
                            web::resource("/{id}/like/")
                                .route(web::post().to(posts::toggle_like))
                                .route(web::get().to(posts::like_status)),
                        ),
                ),
        );
}
