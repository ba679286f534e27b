//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;

use crate::domain::{User, UserProfile};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub document: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub state: bool,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Columns selected for profile queries; credential columns are never read.
pub const PROFILE_COLUMNS: [Column; 8] = [
    Column::Id,
    Column::Document,
    Column::Username,
    Column::Email,
    Column::Name,
    Column::State,
    Column::CreatedAt,
    Column::UpdatedAt,
];

/// Row shape produced by a `select_only` over [`PROFILE_COLUMNS`]
#[derive(Debug, FromQueryResult)]
pub struct ProfileRow {
    pub id: Uuid,
    pub document: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub state: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            document: model.document,
            username: model.username,
            password_hash: model.password,
            email: model.email,
            name: model.name,
            state: model.state,
            reset_password_token: model.reset_password_token,
            reset_password_expires: model.reset_password_expires,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile {
            id: row.id,
            document: row.document,
            username: row.username,
            email: row.email,
            name: row.name,
            state: row.state,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
