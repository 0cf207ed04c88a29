use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;

use crate::config::DatabaseConfig;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::AppSecret;
use crate::domain::auth::models::ClientApplication;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRepository;
use crate::domain::auth::ports::UserRepository;

/// PostgreSQL storage for users, client applications and admin grants.
///
/// Every operation runs in its own transaction on the shared pool. An
/// early return or a cancelled future drops the transaction, which rolls
/// it back and hands the connection back to the pool.
#[derive(Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: i32,
    name: String,
    secret: String,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the connection pool and verify the database is reachable.
    ///
    /// # Errors
    /// * `Internal` - Database is unreachable or the URL is invalid
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| internal("connect", e))?;

        tracing::info!(
            max_connections = config.max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        Ok(Self::new(pool))
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// * `Internal` - A migration failed
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| internal("migrate", e))?;

        tracing::info!(database = "postgresql", "Database migrations completed");

        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn begin(
        &self,
        operation: &'static str,
    ) -> Result<Transaction<'static, Postgres>, StorageError> {
        self.pool.begin().await.map_err(|e| internal(operation, e))
    }
}

/// A failed commit is always `Internal`, whatever the statement returned.
async fn commit(
    tx: Transaction<'static, Postgres>,
    operation: &'static str,
) -> Result<(), StorageError> {
    tx.commit().await.map_err(|e| internal(operation, e))
}

fn internal(operation: &'static str, error: impl std::fmt::Display) -> StorageError {
    tracing::error!(operation, error = %error, "Storage operation failed");
    StorageError::Internal(format!("{}: {}", operation, error))
}

#[async_trait]
impl UserRepository for PostgresStorage {
    async fn save_user(
        &self,
        email: &EmailAddress,
        pass_hash: &[u8],
    ) -> Result<UserId, StorageError> {
        let mut tx = self.begin("save_user").await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(pass_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserAlreadyExists;
                }
            }
            internal("save_user", e)
        })?;

        commit(tx, "save_user").await?;

        Ok(UserId(id))
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<User, StorageError> {
        let mut tx = self.begin("find_user_by_email").await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| internal("find_user_by_email", e))?;

        commit(tx, "find_user_by_email").await?;

        let row = row.ok_or(StorageError::UserNotFound)?;

        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)
                .map_err(|e| internal("find_user_by_email", format!("corrupt email: {}", e)))?,
            pass_hash: row.pass_hash,
        })
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        let mut tx = self.begin("is_admin").await?;

        let is_admin: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM admins
                WHERE user_id = $1
            )
            "#,
        )
        .bind(user_id.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| internal("is_admin", e))?;

        commit(tx, "is_admin").await?;

        Ok(is_admin)
    }
}

#[async_trait]
impl ApplicationRepository for PostgresStorage {
    async fn find_application(&self, app_id: AppId) -> Result<ClientApplication, StorageError> {
        let mut tx = self.begin("find_application").await?;

        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| internal("find_application", e))?;

        commit(tx, "find_application").await?;

        let row = row.ok_or(StorageError::ApplicationNotFound)?;

        Ok(ClientApplication {
            id: AppId(row.id),
            name: row.name,
            secret: AppSecret::new(row.secret),
        })
    }
}
