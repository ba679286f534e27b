//! User repository - the persistent record store behind the credential service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity, ProfileRow, PROFILE_COLUMNS};
use crate::config::UNIQUE_USER_COLUMNS;
use crate::domain::{NewUserRecord, User, UserProfile};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `None` when nothing matches; write operations report the
/// number of affected rows instead of failing on a missing record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by document number
    async fn find_by_document(&self, document: i64) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find user matching both document and email exactly
    async fn find_by_document_and_email(
        &self,
        document: i64,
        email: &str,
    ) -> AppResult<Option<User>>;

    /// Find user currently holding a reset token
    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<User>>;

    /// List all users without credential columns
    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>>;

    /// Find one user by document without credential columns
    async fn find_profile_by_document(&self, document: i64) -> AppResult<Option<UserProfile>>;

    /// Insert a new user.
    ///
    /// A unique constraint violation surfaces as `AppError::DuplicateField`.
    async fn create(&self, record: NewUserRecord) -> AppResult<User>;

    /// Store a reset token and expiry on the user with this document
    async fn set_reset_token(
        &self,
        document: i64,
        token: &str,
        expires: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Replace the password of the user holding `token` and clear the token
    async fn update_password_by_token(&self, token: &str, password_hash: String)
        -> AppResult<u64>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_document(&self, document: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Document.eq(document))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_document_and_email(
        &self,
        document: i64,
        email: &str,
    ) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Document.eq(document))
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::ResetPasswordToken.eq(token))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        let rows = UserEntity::find()
            .select_only()
            .columns(PROFILE_COLUMNS)
            .order_by_asc(user::Column::Document)
            .into_model::<ProfileRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    async fn find_profile_by_document(&self, document: i64) -> AppResult<Option<UserProfile>> {
        let row = UserEntity::find()
            .select_only()
            .columns(PROFILE_COLUMNS)
            .filter(user::Column::Document.eq(document))
            .into_model::<ProfileRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(UserProfile::from))
    }

    async fn create(&self, record: NewUserRecord) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            document: Set(record.document),
            username: Set(record.username.clone()),
            password: Set(record.password_hash.clone()),
            email: Set(record.email.clone()),
            name: Set(record.name.clone()),
            state: Set(record.state),
            reset_password_token: Set(None),
            reset_password_expires: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| creation_error(e, &record))?;
        Ok(User::from(model))
    }

    async fn set_reset_token(
        &self,
        document: i64,
        token: &str,
        expires: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(
                user::Column::ResetPasswordToken,
                Expr::value(Some(token.to_string())),
            )
            .col_expr(user::Column::ResetPasswordExpires, Expr::value(Some(expires)))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Document.eq(document))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn update_password_by_token(
        &self,
        token: &str,
        password_hash: String,
    ) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .col_expr(user::Column::ResetPasswordToken, Expr::value(Option::<String>::None))
            .col_expr(
                user::Column::ResetPasswordExpires,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::ResetPasswordToken.eq(token))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

/// Translate an insert failure, naming the offending field on unique violations.
fn creation_error(err: DbErr, record: &NewUserRecord) -> AppError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        if let Some((field, value)) = duplicate_field(&message, record) {
            tracing::debug!(field = %field, "unique constraint rejected new user");
            return AppError::duplicate_field(field, value);
        }
    }
    AppError::from(err)
}

/// Match a database unique-violation message to one of the unique columns.
pub(crate) fn duplicate_field(message: &str, record: &NewUserRecord) -> Option<(String, String)> {
    let message = message.to_lowercase();

    UNIQUE_USER_COLUMNS
        .iter()
        .find(|column| message.contains(*column))
        .and_then(|column| {
            record
                .unique_value(column)
                .map(|value| (column.to_string(), value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    /// Statements the store sent, with parameters inlined
    fn executed_sql(db: DatabaseConnection) -> Vec<String> {
        db.into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.to_string()))
            .collect()
    }

    fn assert_no_credential_columns(sql: &str) {
        assert!(!sql.contains(r#""password""#), "selects password: {}", sql);
        assert!(!sql.contains("reset_password_"), "selects reset fields: {}", sql);
    }

    fn record() -> NewUserRecord {
        NewUserRecord {
            document: 1020304050,
            username: "u1020304050".into(),
            password_hash: "$argon2id$hash".into(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
            state: true,
        }
    }

    fn model(document: i64) -> user::Model {
        let now = Utc::now();
        user::Model {
            id: Uuid::new_v4(),
            document,
            username: format!("u{}", document),
            password: "$argon2id$hash".into(),
            email: format!("{}@example.com", document),
            name: "Ana".into(),
            state: true,
            reset_password_token: Some("tok".into()),
            reset_password_expires: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_duplicate_field_from_postgres_message() {
        let msg = r#"duplicate key value violates unique constraint "users_email_key""#;
        assert_eq!(
            duplicate_field(msg, &record()),
            Some(("email".to_string(), "ana@example.com".to_string()))
        );

        let msg = r#"duplicate key value violates unique constraint "users_document_key""#;
        assert_eq!(
            duplicate_field(msg, &record()),
            Some(("document".to_string(), "1020304050".to_string()))
        );
    }

    #[test]
    fn test_duplicate_field_username() {
        let msg = r#"duplicate key value violates unique constraint "users_username_key""#;
        assert_eq!(
            duplicate_field(msg, &record()).map(|(f, _)| f),
            Some("username".to_string())
        );
    }

    #[test]
    fn test_duplicate_field_unknown_constraint() {
        assert_eq!(duplicate_field("users_pkey", &record()), None);
    }

    #[tokio::test]
    async fn test_find_by_username_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(42)]])
            .into_connection();
        let store = UserStore::new(db);

        let user = store.find_by_username("u42").await.unwrap().unwrap();
        assert_eq!(user.document, 42);
        assert_eq!(user.password_hash, "$argon2id$hash");
        assert_eq!(user.reset_password_token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_find_by_reset_token_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(db);

        assert!(store.find_by_reset_token("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_profiles() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1), model(2)]])
            .into_connection();
        let store = UserStore::new(db.clone());

        let profiles = store.list_profiles().await.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[1].username, "u2");

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with("SELECT"));
        assert!(sql[0].contains(r#""users"."username""#));
        assert!(sql[0].contains(r#"ORDER BY "users"."document" ASC"#));
        assert_no_credential_columns(&sql[0]);
    }

    #[tokio::test]
    async fn test_find_profile_by_document_projects_public_columns() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7)]])
            .into_connection();
        let store = UserStore::new(db.clone());

        let profile = store.find_profile_by_document(7).await.unwrap().unwrap();
        assert_eq!(profile.username, "u7");

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains(r#""users"."document" = 7"#));
        assert!(sql[0].contains(r#""users"."email""#));
        assert_no_credential_columns(&sql[0]);
    }

    #[tokio::test]
    async fn test_full_lookup_selects_credentials() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7)]])
            .into_connection();
        let store = UserStore::new(db.clone());

        store.find_by_document(7).await.unwrap();

        let sql = executed_sql(db);
        assert!(sql[0].contains(r#""users"."password""#));
        assert!(sql[0].contains(r#""users"."reset_password_token""#));
    }

    #[tokio::test]
    async fn test_set_reset_token_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let store = UserStore::new(db.clone());

        let affected = store
            .set_reset_token(999, "tok", Utc::now())
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with(r#"UPDATE "users""#));
        assert!(sql[0].contains(r#""reset_password_token" = 'tok'"#));
        assert!(sql[0].contains(r#""document" = 999"#));
        assert!(!sql[0].contains(r#""reset_password_expires" = NULL"#));
    }

    #[tokio::test]
    async fn test_update_password_by_token() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let store = UserStore::new(db.clone());

        let affected = store
            .update_password_by_token("tok", "$argon2id$new".into())
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        let update = &sql[0];
        assert!(update.starts_with(r#"UPDATE "users""#));
        assert!(update.contains(r#""password" = '$argon2id$new'"#));
        assert!(update.contains(r#""reset_password_token" = NULL"#));
        assert!(update.contains(r#""reset_password_expires" = NULL"#));
        assert!(update.contains(r#""reset_password_token" = 'tok'"#));
    }

    #[tokio::test]
    async fn test_create_returns_inserted_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1020304050)]])
            .into_connection();
        let store = UserStore::new(db);

        let user = store.create(record()).await.unwrap();
        assert_eq!(user.document, 1020304050);
        assert!(user.state);
    }
}
