//! Initial schema: mentors, teams, members and the team_members join table

use sea_orm_migration::{prelude::*, schema::*};

use crate::schema::{
    MEMBER_FULLNAME_MAX, MENTOR_FULLNAME_MAX, SPECIALIZATION_MAX, TEAM_PROJECT_MAX,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. Create mentors table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Mentor::Table)
                    .if_not_exists()
                    .col(pk_auto(Mentor::Id))
                    .col(string_len(Mentor::Fullname, MENTOR_FULLNAME_MAX as u32).not_null())
                    .col(
                        string_len(Mentor::Specialization, SPECIALIZATION_MAX as u32).not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. Create teams table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(pk_auto(Team::Id))
                    .col(string_len(Team::Project, TEAM_PROJECT_MAX as u32).not_null())
                    .col(string_len(Team::Specialization, SPECIALIZATION_MAX as u32).not_null())
                    .col(integer(Team::MentorId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_mentor_id")
                            .from(Team::Table, Team::MentorId)
                            .to(Mentor::Table, Mentor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teams_mentor_id")
                    .table(Team::Table)
                    .col(Team::MentorId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. Create members table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(pk_auto(Member::Id))
                    .col(
                        string_len(Member::Fullname, MEMBER_FULLNAME_MAX as u32)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. Create team_members junction table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .if_not_exists()
                    .col(integer(TeamMember::TeamId).not_null())
                    .col(integer(TeamMember::MemberId).not_null())
                    .primary_key(
                        Index::create()
                            .col(TeamMember::TeamId)
                            .col(TeamMember::MemberId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_team_id")
                            .from(TeamMember::Table, TeamMember::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_member_id")
                            .from(TeamMember::Table, TeamMember::MemberId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_members_member_id")
                    .table(TeamMember::Table)
                    .col(TeamMember::MemberId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(TeamMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Mentor::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Mentor {
    #[sea_orm(iden = "mentors")]
    Table,
    Id,
    Fullname,
    Specialization,
}

#[derive(DeriveIden)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Project,
    Specialization,
    MentorId,
}

#[derive(DeriveIden)]
enum Member {
    #[sea_orm(iden = "members")]
    Table,
    Id,
    Fullname,
}

#[derive(DeriveIden)]
enum TeamMember {
    #[sea_orm(iden = "team_members")]
    Table,
    TeamId,
    MemberId,
}
