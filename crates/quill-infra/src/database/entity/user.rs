//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub country: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub avatar_url: String,
    pub last_login: Option<DateTimeWithTimeZone>,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for quill_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: Role::parse(&model.role),
            bio: model.bio,
            country: model.country,
            skills: model.skills,
            languages: model.languages,
            avatar_url: model.avatar_url,
            last_login: model.last_login.map(Into::into),
            reset_token_hash: model.reset_token_hash,
            reset_token_expires: model.reset_token_expires.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<quill_core::domain::User> for ActiveModel {
    fn from(user: quill_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            bio: Set(user.bio),
            country: Set(user.country),
            skills: Set(user.skills),
            languages: Set(user.languages),
            avatar_url: Set(user.avatar_url),
            last_login: Set(user.last_login.map(Into::into)),
            reset_token_hash: Set(user.reset_token_hash),
            reset_token_expires: Set(user.reset_token_expires.map(Into::into)),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
