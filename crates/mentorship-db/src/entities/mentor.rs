//! Mentor entity; a mentor owns zero or more teams

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentors")]
pub struct Model {
    /// Mentor ID (primary key, assigned by the store)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Full name
    pub fullname: String,

    /// Specialization tag, propagated to owned teams on update
    pub specialization: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Mentor owns teams
    #[sea_orm(has_many = "super::team::Entity")]
    Teams,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
