//! API models
//!
//! Wire types live in `mentorship-proto`; this module re-exports them and maps
//! store rows onto them.

pub use mentorship_proto::*;

use mentorship_db::entities::team;
use mentorship_db::{MentorWithTeams, TeamWithMembers};

pub(crate) fn team_summary(team: team::Model) -> TeamSummary {
    TeamSummary {
        id: team.id,
        project: team.project,
        specialization: team.specialization,
        mentor_id: team.mentor_id,
    }
}

pub(crate) fn mentor_detail(found: MentorWithTeams) -> MentorDetail {
    MentorDetail {
        id: found.mentor.id,
        fullname: found.mentor.fullname,
        specialization: found.mentor.specialization,
        teams: found.teams.into_iter().map(team_summary).collect(),
    }
}

pub(crate) fn team_detail(found: TeamWithMembers) -> TeamDetail {
    TeamDetail {
        id: found.team.id,
        project: found.team.project,
        specialization: found.team.specialization,
        members: found.members,
    }
}
