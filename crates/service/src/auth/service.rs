use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use models::user_admin;

use super::domain::{AdminResponse, LoginAdminInput, RegisterAdminInput};
use crate::catalog::repository::AdminStore;
use crate::errors::ServiceError;

const MIN_PASSWORD_LEN: usize = 8;

/// Admin account service, independent of the web framework.
pub struct AdminService {
    admins: Arc<dyn AdminStore>,
}

impl AdminService {
    pub fn new(admins: Arc<dyn AdminStore>) -> Self { Self { admins } }

    /// Register a new admin with an argon2-hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AdminService, domain::RegisterAdminInput};
    /// use service::catalog::repo::memory::InMemoryCatalogStore;
    /// let svc = AdminService::new(Arc::new(InMemoryCatalogStore::new()));
    /// let input = RegisterAdminInput { email: "Ana@Shop.io".into(), full_name: "Ana".into(), password: "Secret123".into() };
    /// let admin = tokio_test::block_on(svc.register_admin(input)).unwrap();
    /// assert_eq!(admin.email, "ana@shop.io");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_admin(&self, input: RegisterAdminInput) -> Result<AdminResponse, ServiceError> {
        let email = user_admin::validate_email(&input.email)?;
        let full_name = user_admin::validate_full_name(&input.full_name)?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!("password too short (>={})", MIN_PASSWORD_LEN)));
        }
        if let Some(existing) = self.admins.find_by_email(&email).await? {
            debug!("admin exists: {}", existing.email);
            return Err(ServiceError::Conflict("admin already exists".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Validation(format!("cannot hash password: {}", e)))?
            .to_string();

        let admin = self.admins.insert(user_admin::NewUserAdmin { email, full_name, password_hash }).await?;
        info!(user_admin_id = %admin.id, email = %admin.email, "admin_registered");
        Ok(admin.into())
    }

    /// Check credentials and return the admin identity.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login_admin(&self, input: LoginAdminInput) -> Result<AdminResponse, ServiceError> {
        let email = input.email.trim().to_lowercase();
        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("invalid credentials".into()))?;

        let parsed = PasswordHash::new(&admin.password_hash)
            .map_err(|_| ServiceError::Unauthorized("invalid credentials".into()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(ServiceError::Unauthorized("invalid credentials".into()));
        }
        info!(user_admin_id = %admin.id, "admin_logged_in");
        Ok(admin.into())
    }
}
