//! PostgreSQL implementation of UserRepository.
//!
//! Ids are UUIDs generated by the database. Email uniqueness is enforced by
//! the `users_email_key` constraint, so concurrent registrations for the same
//! address resolve to exactly one row.

use crate::domain::account::{AccountPatch, BillingInfo, NewUser, PaymentDetails, User};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, full_name, password_hash, google_id, role, verified, \
     has_active_subscription, has_active_prepaid, has_purchase_history, \
     payment_details, billing_info, registered_at";

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    full_name: String,
    password_hash: Option<String>,
    google_id: Option<String>,
    role: String,
    verified: String,
    has_active_subscription: bool,
    has_active_prepaid: bool,
    has_purchase_history: bool,
    payment_details: Option<Json<PaymentDetails>>,
    billing_info: Option<Json<BillingInfo>>,
    registered_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid role value: {}", e))
        })?;
        let verified = row.verified.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid verified value: {}", e),
            )
        })?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            full_name: row.full_name,
            password: row.password_hash,
            google_id: row.google_id,
            role,
            verified,
            has_active_subscription: row.has_active_subscription,
            has_active_prepaid: row.has_active_prepaid,
            has_purchase_history: row.has_purchase_history,
            payment_details: row.payment_details.map(|Json(details)| details),
            billing_info: row.billing_info.map(|Json(info)| info),
            registered_at: Timestamp::from_datetime(row.registered_at),
        })
    }
}

/// Ids that are not UUIDs cannot exist in this store.
fn parse_user_uuid(id: &UserId) -> Option<Uuid> {
    Uuid::parse_str(id.as_str()).ok()
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
}

fn write_error(action: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
            return DomainError::new(ErrorCode::UserExists, "Email already in use.");
        }
    }
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {} user: {}", action, e),
    )
}

fn read_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch user: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users (email, full_name, password_hash, google_id, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );

        let row: UserRow = sqlx::query_as(&sql)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password)
            .bind(&user.google_id)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error("create", e))?;

        row.try_into()
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let uuid = parse_user_uuid(&user.id).ok_or_else(|| not_found(&user.id))?;
        let sql = format!(
            r#"
            UPDATE users SET
                email = $2,
                full_name = $3,
                password_hash = $4,
                google_id = $5,
                role = $6,
                verified = $7,
                has_active_subscription = $8,
                has_active_prepaid = $9,
                has_purchase_history = $10,
                payment_details = $11,
                billing_info = $12
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(uuid)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password)
            .bind(&user.google_id)
            .bind(user.role.as_str())
            .bind(user.verified.as_str())
            .bind(user.has_active_subscription)
            .bind(user.has_active_prepaid)
            .bind(user.has_purchase_history)
            .bind(user.payment_details.as_ref().map(Json))
            .bind(user.billing_info.as_ref().map(Json))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("update", e))?;

        row.ok_or_else(|| not_found(&user.id))?.try_into()
    }

    async fn apply_patch(&self, id: &UserId, patch: AccountPatch) -> Result<User, DomainError> {
        let uuid = parse_user_uuid(id).ok_or_else(|| not_found(id))?;
        let sql = format!(
            "UPDATE users SET {} = $2 WHERE id = $1 RETURNING {}",
            patch.column(),
            USER_COLUMNS
        );

        let query = sqlx::query_as::<_, UserRow>(&sql).bind(uuid);
        let query = match patch {
            AccountPatch::Verified(state) => query.bind(state.as_str()),
            AccountPatch::HasActiveSubscription(value)
            | AccountPatch::HasActivePrepaid(value)
            | AccountPatch::HasPurchaseHistory(value) => query.bind(value),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("patch", e))?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let Some(uuid) = parse_user_uuid(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.map(User::try_from).transpose()
    }
}
