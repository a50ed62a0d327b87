use actix_web::http::header::ContentType;
use actix_web::{get, put, web, HttpRequest, HttpResponse};

use crate::api::types::Response;
use crate::app::App;
use crate::errors::ProfilesError;
use crate::models::user::User;
use crate::validation::{LookupParams, NewUser};

#[get("/user/{username}")]
pub async fn get_users_by_username(app: web::Data<App>, req: HttpRequest) -> Response {
    let params = LookupParams::parse(req.match_info().get("username"))?;

    let users = app.record_store.find_by_username(&params.username).await?;

    Ok(HttpResponse::Ok().json(users))
}

#[put("/user/new")]
pub async fn create_user(app: web::Data<App>, body: web::Bytes) -> Response {
    let new_user = NewUser::from_body(&body)?;

    let user = User::create(&app, new_user).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(user.id.to_string()))
}

pub async fn invalid_path() -> Response {
    Err(ProfilesError::InvalidPath)
}
