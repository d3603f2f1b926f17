//! Member entity; a person who may belong to several teams

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Member ID (primary key, assigned by the store)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Full name (globally unique)
    #[sea_orm(unique)]
    pub fullname: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Member has membership edges
    #[sea_orm(has_many = "super::team_member::Entity")]
    Memberships,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
