//! Roster queries over mentors, teams and members
//!
//! Relationship traversal is done with explicit queries. Multi-step writes
//! (team creation plus member linking, membership replacement) are not wrapped
//! in a transaction: a failure part-way leaves the rows written so far.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use tracing::debug;

use crate::entities::prelude::*;
use crate::entities::{member, mentor, team, team_member};
use crate::error::StoreError;
use crate::validation::{MemberNames, MentorChanges, NewMentor, NewTeam, TeamChanges};

/// A mentor together with the teams it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorWithTeams {
    pub mentor: mentor::Model,
    pub teams: Vec<team::Model>,
}

/// A team together with its member names, ordered by member id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWithMembers {
    pub team: team::Model,
    pub members: Vec<String>,
}

// ============================================================
// Mentors
// ============================================================

pub async fn list_mentor_ids<C: ConnectionTrait>(db: &C) -> Result<Vec<i32>, StoreError> {
    let ids = Mentor::find()
        .select_only()
        .column(mentor::Column::Id)
        .order_by_asc(mentor::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?;
    Ok(ids)
}

pub async fn find_mentor<C: ConnectionTrait>(db: &C, id: i32) -> Result<mentor::Model, StoreError> {
    Mentor::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::not_found("mentor", id))
}

pub async fn mentor_with_teams<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<MentorWithTeams, StoreError> {
    let mentor = find_mentor(db, id).await?;
    let teams = Team::find()
        .filter(team::Column::MentorId.eq(mentor.id))
        .order_by_asc(team::Column::Id)
        .all(db)
        .await?;
    Ok(MentorWithTeams { mentor, teams })
}

pub async fn create_mentor<C: ConnectionTrait>(
    db: &C,
    new: NewMentor,
) -> Result<mentor::Model, StoreError> {
    let mentor = mentor::ActiveModel {
        fullname: Set(new.fullname),
        specialization: Set(new.specialization),
        ..Default::default()
    };
    Ok(mentor.insert(db).await?)
}

/// Apply `changes`, then copy the mentor's specialization onto every team it owns
///
/// The copy happens whether or not the specialization itself changed.
pub async fn update_mentor<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: MentorChanges,
) -> Result<mentor::Model, StoreError> {
    let existing = find_mentor(db, id).await?;
    let mut active: mentor::ActiveModel = existing.clone().into();

    if let Some(fullname) = changes.fullname {
        active.fullname = Set(fullname);
    }
    if let Some(specialization) = changes.specialization {
        active.specialization = Set(specialization);
    }

    let mentor = if active.is_changed() {
        active.update(db).await?
    } else {
        existing
    };

    let propagated = Team::update_many()
        .col_expr(
            team::Column::Specialization,
            Expr::value(mentor.specialization.clone()),
        )
        .filter(team::Column::MentorId.eq(mentor.id))
        .exec(db)
        .await?;
    debug!(
        "Propagated specialization '{}' to {} team(s) of mentor {}",
        mentor.specialization, propagated.rows_affected, mentor.id
    );

    Ok(mentor)
}

/// Delete a mentor with its teams and their membership edges
///
/// Members are kept. Returns whether the mentor existed.
pub async fn delete_mentor<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, StoreError> {
    let team_ids = list_team_ids(db, id).await?;
    if !team_ids.is_empty() {
        TeamMember::delete_many()
            .filter(team_member::Column::TeamId.is_in(team_ids))
            .exec(db)
            .await?;
        Team::delete_many()
            .filter(team::Column::MentorId.eq(id))
            .exec(db)
            .await?;
    }

    let result = Mentor::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

// ============================================================
// Teams
// ============================================================

pub async fn list_team_ids<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
) -> Result<Vec<i32>, StoreError> {
    let ids = Team::find()
        .select_only()
        .column(team::Column::Id)
        .filter(team::Column::MentorId.eq(mentor_id))
        .order_by_asc(team::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?;
    Ok(ids)
}

/// Find a team owned by `mentor_id`; a team of another mentor counts as absent
pub async fn find_team<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
    team_id: i32,
) -> Result<team::Model, StoreError> {
    Team::find_by_id(team_id)
        .filter(team::Column::MentorId.eq(mentor_id))
        .one(db)
        .await?
        .ok_or(StoreError::not_found("team", team_id))
}

pub async fn member_names<C: ConnectionTrait>(
    db: &C,
    team_id: i32,
) -> Result<Vec<String>, StoreError> {
    let names = Member::find()
        .inner_join(TeamMember)
        .filter(team_member::Column::TeamId.eq(team_id))
        .order_by_asc(member::Column::Id)
        .select_only()
        .column(member::Column::Fullname)
        .into_tuple::<String>()
        .all(db)
        .await?;
    Ok(names)
}

pub async fn team_with_member_names<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
    team_id: i32,
) -> Result<TeamWithMembers, StoreError> {
    let team = find_team(db, mentor_id, team_id).await?;
    let members = member_names(db, team.id).await?;
    Ok(TeamWithMembers { team, members })
}

/// Create a team under an existing mentor and link the given members
pub async fn create_team<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
    new: NewTeam,
    members: &MemberNames,
) -> Result<team::Model, StoreError> {
    let mentor = find_mentor(db, mentor_id).await?;

    let team = team::ActiveModel {
        project: Set(new.project),
        specialization: Set(new.specialization),
        mentor_id: Set(mentor.id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    link_members(db, team.id, members).await?;

    Ok(team)
}

/// Update team fields; membership is left untouched
pub async fn update_team<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
    team_id: i32,
    changes: TeamChanges,
) -> Result<team::Model, StoreError> {
    let existing = find_team(db, mentor_id, team_id).await?;
    let mut active: team::ActiveModel = existing.clone().into();

    if let Some(project) = changes.project {
        active.project = Set(project);
    }
    if let Some(specialization) = changes.specialization {
        active.specialization = Set(specialization);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    Ok(active.update(db).await?)
}

/// Delete a team and its membership edges; members are kept
///
/// Returns whether the team existed under `mentor_id`.
pub async fn delete_team<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
    team_id: i32,
) -> Result<bool, StoreError> {
    let team = match find_team(db, mentor_id, team_id).await {
        Ok(team) => team,
        Err(StoreError::NotFound { .. }) => return Ok(false),
        Err(e) => return Err(e),
    };

    TeamMember::delete_many()
        .filter(team_member::Column::TeamId.eq(team.id))
        .exec(db)
        .await?;
    let result = Team::delete_by_id(team.id).exec(db).await?;

    Ok(result.rows_affected > 0)
}

/// Drop every membership edge of the team, then link exactly `members`
pub async fn replace_team_members<C: ConnectionTrait>(
    db: &C,
    mentor_id: i32,
    team_id: i32,
    members: &MemberNames,
) -> Result<(), StoreError> {
    let team = find_team(db, mentor_id, team_id).await?;

    let removed = TeamMember::delete_many()
        .filter(team_member::Column::TeamId.eq(team.id))
        .exec(db)
        .await?;
    debug!(
        "Removed {} membership edge(s) from team {}",
        removed.rows_affected, team.id
    );

    if members.is_empty() {
        debug!("Team {} left without members", team.id);
        return Ok(());
    }

    link_members(db, team.id, members).await
}

// ============================================================
// Members
// ============================================================

/// Return the member named `fullname`, creating it if absent
///
/// A concurrent insert of the same name surfaces as a unique violation; the
/// winner's row is then read back.
pub async fn find_or_create_member<C: ConnectionTrait>(
    db: &C,
    fullname: &str,
) -> Result<member::Model, StoreError> {
    if let Some(existing) = find_member_by_name(db, fullname).await? {
        return Ok(existing);
    }

    let insert = member::ActiveModel {
        fullname: Set(fullname.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await;

    match insert {
        Ok(created) => {
            debug!("Created member {} ({})", created.id, created.fullname);
            Ok(created)
        }
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            match find_member_by_name(db, fullname).await? {
                Some(existing) => Ok(existing),
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

async fn find_member_by_name<C: ConnectionTrait>(
    db: &C,
    fullname: &str,
) -> Result<Option<member::Model>, StoreError> {
    Ok(Member::find()
        .filter(member::Column::Fullname.eq(fullname))
        .one(db)
        .await?)
}

/// Insert the (team, member) edge unless it already exists
pub async fn link_member<C: ConnectionTrait>(
    db: &C,
    team_id: i32,
    member_id: i32,
) -> Result<(), StoreError> {
    let edge = team_member::ActiveModel {
        team_id: Set(team_id),
        member_id: Set(member_id),
    };

    TeamMember::insert(edge)
        .on_conflict(
            OnConflict::columns([team_member::Column::TeamId, team_member::Column::MemberId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}

async fn link_members<C: ConnectionTrait>(
    db: &C,
    team_id: i32,
    members: &MemberNames,
) -> Result<(), StoreError> {
    for name in members.iter() {
        let member = find_or_create_member(db, name).await?;
        link_member(db, team_id, member.id).await?;
    }
    Ok(())
}
