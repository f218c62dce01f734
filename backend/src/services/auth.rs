//! Registration, login, status and logout
//!
//! Token checks always run in the same order: decode (structure and
//! signature), blacklist lookup, expiry.

use crate::auth::{check_live, Claims, JwtService, PasswordService};
use crate::db::{is_sqlx_unique_violation, is_unique_violation};
use crate::error::ApiError;
use crate::repositories::{BlacklistRepository, CreateUser, UserRepository};
use chrono::Utc;
use metrics::counter;
use sqlx::PgPool;
use tracing::{info, warn};
use users_service_shared::{
    validation::validate_request, LoginRequest, RegisterRequest, Role, TokenError, User,
    UserProfile,
};

const REGISTRATIONS: &str = "users_registrations_total";
const LOGINS: &str = "users_logins_total";
const LOGOUTS: &str = "users_logouts_total";

pub struct AuthService;

impl AuthService {
    /// Register a new user and mint their first token
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        req: &RegisterRequest,
    ) -> Result<String, ApiError> {
        validate_request(req).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(pool, &req.email).await? {
            counter!(REGISTRATIONS, "outcome" => "already_exists").increment(1);
            return Err(ApiError::AlreadyExists);
        }

        let password_hash = PasswordService::hash_async(req.password.clone()).await?;

        let created = UserRepository::create(
            pool,
            CreateUser {
                email: &req.email,
                password_hash: &password_hash,
                first_name: &req.first_name,
                last_name: &req.last_name,
                role_id: Role::User.id(),
            },
        )
        .await;

        let user = match created {
            Ok(user) => user,
            // Lost a race with a concurrent registration of the same email
            Err(e) if is_unique_violation(&e) => {
                counter!(REGISTRATIONS, "outcome" => "already_exists").increment(1);
                return Err(ApiError::AlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        let token = jwt.mint(&user.email)?;
        counter!(REGISTRATIONS, "outcome" => "success").increment(1);
        info!(user_id = %user.id, "User registered");
        Ok(token)
    }

    /// Check credentials and mint a token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        req: &LoginRequest,
    ) -> Result<String, ApiError> {
        validate_request(req).map_err(ApiError::Validation)?;

        let Some(user) = UserRepository::find_by_email(pool, &req.email).await? else {
            counter!(LOGINS, "outcome" => "not_found").increment(1);
            return Err(ApiError::NotFound);
        };

        let valid =
            PasswordService::verify_async(req.password.clone(), user.password_hash.clone()).await?;
        if !valid {
            counter!(LOGINS, "outcome" => "wrong_credentials").increment(1);
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(ApiError::WrongCredentials);
        }

        let token = jwt.mint(&user.email)?;
        counter!(LOGINS, "outcome" => "success").increment(1);
        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Resolve a bearer token to its live claims
    pub async fn authenticate(
        pool: &PgPool,
        jwt: &JwtService,
        token: &str,
    ) -> Result<Claims, ApiError> {
        let claims = jwt.decode(token)?;
        let blacklisted = BlacklistRepository::is_blacklisted(pool, token).await?;
        Ok(check_live(claims, blacklisted, Utc::now())?)
    }

    /// Public profile of the token's owner
    pub async fn status(
        pool: &PgPool,
        jwt: &JwtService,
        token: &str,
    ) -> Result<UserProfile, ApiError> {
        let claims = Self::authenticate(pool, jwt, token).await?;

        let user = UserRepository::find_by_email(pool, &claims.sub)
            .await?
            .ok_or(ApiError::NotFound)?;

        Ok(UserProfile::from(User::from(user)))
    }

    /// Revoke a live token
    ///
    /// Not idempotent: logging out an already revoked token fails with
    /// `Blacklisted`.
    pub async fn logout(pool: &PgPool, jwt: &JwtService, token: &str) -> Result<(), ApiError> {
        let claims = match jwt.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                counter!(LOGOUTS, "outcome" => "rejected").increment(1);
                return Err(e.into());
            }
        };

        let mut tx = pool.begin().await?;

        let blacklisted = BlacklistRepository::is_blacklisted(&mut *tx, token).await?;
        if let Err(e) = check_live(claims, blacklisted, Utc::now()) {
            counter!(LOGOUTS, "outcome" => "rejected").increment(1);
            return Err(e.into());
        }

        match BlacklistRepository::insert(&mut *tx, token).await {
            Ok(_) => {}
            // A concurrent logout of the same token committed first
            Err(e) if is_unique_violation(&e) => {
                counter!(LOGOUTS, "outcome" => "rejected").increment(1);
                return Err(TokenError::Blacklisted.into());
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await.map_err(|e| {
            if is_sqlx_unique_violation(&e) {
                counter!(LOGOUTS, "outcome" => "rejected").increment(1);
                ApiError::Token(TokenError::Blacklisted)
            } else {
                ApiError::Database(e)
            }
        })?;

        counter!(LOGOUTS, "outcome" => "success").increment(1);
        info!("Token revoked");
        Ok(())
    }
}
