use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{MediaStorePort, UserRepository};
use crate::domain::types::{TokenPair, User};
use crate::error::IdentityServiceError;
use crate::usecase::token::{TokenKeys, issue_pair};

// ── Password hashing ─────────────────────────────────────────────────────────

/// Hash a password with Argon2id. The PHC string embeds salt and parameters.
pub fn hash_password(password: &str) -> Result<String, IdentityServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| IdentityServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, IdentityServiceError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| IdentityServiceError::Internal(anyhow::anyhow!("parse password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Upload reference for the mandatory avatar image.
    pub avatar: String,
    /// Upload reference for the optional cover image.
    pub cover_image: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository, M: MediaStorePort> {
    pub users: U,
    pub media: M,
}

impl<U: UserRepository, M: MediaStorePort> RegisterUseCase<U, M> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, IdentityServiceError> {
        let full_name = input.full_name.trim();
        let email = input.email.trim();
        let password = input.password.trim();
        // Usernames are case-insensitive: normalized before the uniqueness
        // check and before storage.
        let username = input.username.trim().to_lowercase();

        if [full_name, email, password, username.as_str()]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(IdentityServiceError::MissingField);
        }
        if input.avatar.trim().is_empty() {
            return Err(IdentityServiceError::AvatarRequired);
        }

        if self
            .users
            .find_by_username_or_email(&username, email)
            .await?
            .is_some()
        {
            return Err(IdentityServiceError::UserAlreadyExists);
        }

        let avatar_url = self
            .media
            .upload(input.avatar.trim())
            .await?
            .ok_or(IdentityServiceError::AvatarRequired)?;
        let cover_image_url = match input.cover_image.as_deref().map(str::trim) {
            Some(source) if !source.is_empty() => self.media.upload(source).await?,
            _ => None,
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username,
            email: email.to_owned(),
            full_name: full_name.to_owned(),
            avatar_url,
            cover_image_url,
            password_hash: hash_password(password)?,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, IdentityServiceError> {
        let identifier = input.identifier.trim();
        if identifier.is_empty() {
            return Err(IdentityServiceError::MissingField);
        }

        let user = self
            .users
            .find_by_identifier(identifier)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(IdentityServiceError::InvalidCredentials);
        }

        let tokens = issue_pair(&user, &self.keys)?;
        self.users
            .store_refresh_token(user.id, &tokens.refresh_token)
            .await?;

        Ok(LoginOutput { user, tokens })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> LogoutUseCase<U> {
    /// Clears the stored refresh token (sets NULL, never empty string), so
    /// rotation with any previously issued token fails as revoked.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), IdentityServiceError> {
        self.users.clear_refresh_token(user_id).await
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityServiceError> {
        if new_password.trim().is_empty() {
            return Err(IdentityServiceError::MissingField);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;

        if !verify_password(old_password, &user.password_hash)? {
            return Err(IdentityServiceError::InvalidOldPassword);
        }

        // Only the password column is written; profile fields are untouched.
        self.users
            .update_password_hash(user_id, &hash_password(new_password)?)
            .await
    }
}
