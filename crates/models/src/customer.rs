use sea_orm::{entity::prelude::*, ActiveValue, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All rows, ascending by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
    Entity::find().order_by_asc(Column::Id).all(db).await
}

/// Insert with a store-generated id.
pub async fn insert(db: &DatabaseConnection, name: &str, email: &str) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: ActiveValue::NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
    };
    am.insert(db).await
}

/// Full replace of name/email in one `UPDATE ... RETURNING`.
/// No matching row surfaces as `DbErr::RecordNotUpdated`.
pub async fn replace(db: &DatabaseConnection, id: i32, name: &str, email: &str) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: ActiveValue::Unchanged(id),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
    };
    am.update(db).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
