//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{LoginOtpId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{login_otp::LoginOtp, user::User};
use crate::domain::repository::{LoginOtpRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, otp_code::OtpPurpose, phone::Phone, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired one-time codes
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = self.delete_expired(Utc::now()).await?;
        tracing::info!(otps_deleted = deleted, "Cleaned up expired login OTPs");
        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                phone,
                password_hash,
                verified_at,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.verified_at)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent sign-up for the same email
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AuthError::UserExists
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                phone,
                password_hash,
                verified_at,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                phone,
                password_hash,
                verified_at,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                phone = $2,
                password_hash = $3,
                verified_at = $4,
                last_login_at = $5,
                updated_at = $6
            WHERE user_id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.phone.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.verified_at)
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Login OTP Repository Implementation
// ============================================================================

impl LoginOtpRepository for PgAuthRepository {
    async fn create(&self, otp: &LoginOtp) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_otps (
                login_otp_id,
                user_id,
                purpose,
                code_hash,
                expires_at,
                used,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(otp.id.as_uuid())
        .bind(otp.user_id.as_uuid())
        .bind(otp.purpose.code())
        .bind(&otp.code_hash)
        .bind(otp.expires_at)
        .bind(otp.used)
        .bind(otp.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume(
        &self,
        user_id: &UserId,
        purpose: OtpPurpose,
        code_hash: &[u8],
        now: DateTime<Utc>,
    ) -> AuthResult<Option<LoginOtp>> {
        // Single statement: the row lock taken by the sub-select makes a
        // second concurrent consumer see `used = TRUE` and match nothing.
        let row = sqlx::query_as::<_, LoginOtpRow>(
            r#"
            UPDATE login_otps
            SET used = TRUE, used_at = $4
            WHERE login_otp_id = (
                SELECT login_otp_id
                FROM login_otps
                WHERE user_id = $1
                  AND purpose = $2
                  AND code_hash = $3
                  AND used = FALSE
                  AND expires_at > $4
                ORDER BY created_at DESC
                LIMIT 1
                FOR UPDATE
            )
            AND used = FALSE
            RETURNING
                login_otp_id,
                user_id,
                purpose,
                code_hash,
                expires_at,
                used,
                created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(purpose.code())
        .bind(code_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_otp()).transpose()
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM login_otps WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    phone: String,
    password_hash: String,
    verified_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_db(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e.message())))?;

        Ok(User {
            id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            phone: Phone::from_db(self.phone),
            password_hash,
            verified_at: self.verified_at,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LoginOtpRow {
    login_otp_id: Uuid,
    user_id: Uuid,
    purpose: String,
    code_hash: Vec<u8>,
    expires_at: DateTime<Utc>,
    used: bool,
    created_at: DateTime<Utc>,
}

impl LoginOtpRow {
    fn into_otp(self) -> AuthResult<LoginOtp> {
        let purpose = self.purpose.parse().map_err(AuthError::Internal)?;

        Ok(LoginOtp {
            id: LoginOtpId::from_uuid(self.login_otp_id),
            user_id: UserId::from_uuid(self.user_id),
            purpose,
            code_hash: self.code_hash,
            expires_at: self.expires_at,
            used: self.used,
            created_at: self.created_at,
        })
    }
}
