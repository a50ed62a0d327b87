pub const MIN_NAME_LENGTH: usize = 3;

pub const PROFILE_IMAGES_PREFIX: &str = "profile-images";
pub const PROFILE_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

pub const DEFAULT_USERNAME_INDEX: &str = "username-index";
pub const DEFAULT_PORT: u16 = 3000;
// matches the request payload ceiling of the function runtime the service was deployed on
pub const DEFAULT_MAX_BODY_BYTES: usize = 6 * 1024 * 1024;
