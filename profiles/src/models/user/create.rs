use log::info;

use crate::app::App;
use crate::errors::ProfilesError;
use crate::models::profile_image::ProfileImage;
use crate::models::user::User;
use crate::validation::NewUser;

impl User {
    /// Uploads the profile picture, then writes the record. The record write is only
    /// attempted once the upload succeeded; a failed record write leaves the uploaded
    /// blob behind for the bucket expiration policy to remove.
    pub async fn create(app: &App, mut new_user: NewUser) -> Result<User, ProfilesError> {
        let image = ProfileImage::new(std::mem::take(&mut new_user.profile_picture));

        let content_type = image.content_type();

        app.blob_store.put_object(&image.key, image.bytes, content_type).await?;

        let url = app.blob_store.object_url(&image.key);
        let user = User::new(new_user, url);

        app.record_store.put_user(&user).await?;

        info!("Created user {} ({})", user.id, user.username);

        Ok(user)
    }
}
