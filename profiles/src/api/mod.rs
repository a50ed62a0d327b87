mod types;
mod user_api;

use actix_web::web;

pub use user_api::*;

/// Registers the user routes. Anything else falls through to [`invalid_path`] once
/// mounted as the default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_users_by_username).service(create_user);
}
