//! Team entity; belongs to one mentor, has members through `team_members`

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Team ID (primary key, assigned by the store)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Project the team works on
    pub project: String,

    /// Specialization tag
    pub specialization: String,

    /// Owning mentor
    pub mentor_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Team belongs to a mentor
    #[sea_orm(
        belongs_to = "super::mentor::Entity",
        from = "Column::MentorId",
        to = "super::mentor::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Mentor,

    /// Team has membership edges
    #[sea_orm(has_many = "super::team_member::Entity")]
    Memberships,
}

impl Related<super::mentor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mentor.def()
    }
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
