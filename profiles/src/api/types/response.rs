use actix_web::HttpResponse;

use crate::errors::ProfilesError;

pub type Response = Result<HttpResponse, ProfilesError>;
