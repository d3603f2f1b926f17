//! Column limits shared by the migration and the write-time validation

/// Maximum length of `mentors.fullname`
pub const MENTOR_FULLNAME_MAX: usize = 64;

/// Maximum length of `teams.project`
pub const TEAM_PROJECT_MAX: usize = 64;

/// Maximum length of `members.fullname`
pub const MEMBER_FULLNAME_MAX: usize = 64;

/// Maximum length of the specialization tag on mentors and teams
pub const SPECIALIZATION_MAX: usize = 10;

