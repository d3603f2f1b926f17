//! Database entities

pub mod member;
pub mod mentor;
pub mod team;
pub mod team_member;

pub use member::Entity as Member;
pub use mentor::Entity as Mentor;
pub use team::Entity as Team;
pub use team_member::Entity as TeamMember;

pub mod prelude {
    pub use super::member::Entity as Member;
    pub use super::mentor::Entity as Mentor;
    pub use super::team::Entity as Team;
    pub use super::team_member::Entity as TeamMember;
}
