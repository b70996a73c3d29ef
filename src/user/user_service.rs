use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    state::Config,
    user::{
        user_dto::UpdateProfileRequest,
        user_models::UserResponse,
        user_repository::UserRepository,
    },
};
use uuid::Uuid;

/// Public URL prefix under which `Config::upload_dir` is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
    config: Arc<Config>,
}

impl UserService {
    pub fn new(user_repository: UserRepository, config: Arc<Config>) -> Self {
        Self {
            user_repository,
            config,
        }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<UserResponse> {
        self.get_user(user_id).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserResponse> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>> {
        let users = self.user_repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        payload: UpdateProfileRequest,
    ) -> Result<UserResponse> {
        let username = payload.username.as_deref();
        let email = payload.email.as_deref();

        if (username.is_some() || email.is_some())
            && self.user_repository.is_taken(user_id, username, email).await?
        {
            return Err(AppError::BadRequest(
                "Username or email already in use".to_string(),
            ));
        }

        let user = self
            .user_repository
            .update_profile(
                user_id,
                username,
                email,
                payload.phone.as_deref(),
                payload.department.as_deref(),
                payload.full_name.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::debug!(user_id, "Profile updated");
        Ok(user.into())
    }

    /// Store an uploaded avatar image and point the profile at it.
    pub async fn save_avatar(
        &self,
        user_id: i64,
        content_type: Option<&str>,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if bytes.len() > self.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Avatar must be at most {} bytes",
                self.config.max_upload_bytes
            )));
        }

        let extension = avatar_extension(content_type, file_name).ok_or_else(|| {
            AppError::BadRequest("File must be a PNG, JPEG, GIF or WebP image".to_string())
        })?;

        let dir = self.config.upload_dir.join("avatars");
        tokio::fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&stored_name), bytes).await?;

        let avatar_url = format!("{}/avatars/{}", UPLOADS_URL_PREFIX, stored_name);
        self.user_repository
            .set_avatar(user_id, &avatar_url)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(user_id, %avatar_url, "Avatar uploaded");
        Ok(avatar_url)
    }

    pub async fn delete_user(&self, actor_id: i64, user_id: i64) -> Result<String> {
        if actor_id == user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.user_repository.delete(user_id).await?;
        Ok(user.username)
    }
}

/// File extension for an accepted avatar image, judged by content type first
/// and falling back to the client-supplied file name.
pub fn avatar_extension(content_type: Option<&str>, file_name: Option<&str>) -> Option<&'static str> {
    let by_type = match content_type.map(|c| c.to_ascii_lowercase()).as_deref() {
        Some("image/png") => Some("png"),
        Some("image/jpeg") | Some("image/jpg") => Some("jpg"),
        Some("image/gif") => Some("gif"),
        Some("image/webp") => Some("webp"),
        _ => None,
    };

    by_type.or_else(|| {
        let ext = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some("png"),
            "jpg" | "jpeg" => Some("jpg"),
            "gif" => Some("gif"),
            "webp" => Some("webp"),
            _ => None,
        }
    })
}
