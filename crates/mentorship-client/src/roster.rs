//! Typed roster calls on top of [`ApiClient`]

use mentorship_proto::*;

use crate::client::{ApiClient, ClientError};

fn mentors_path() -> String {
    format!("{}/mentor", API_PREFIX)
}

fn mentor_path(id: i32) -> String {
    format!("{}/mentor/{}", API_PREFIX, id)
}

fn teams_path(mentor_id: i32) -> String {
    format!("{}/mentor/{}/team", API_PREFIX, mentor_id)
}

fn team_path(mentor_id: i32, team_id: i32) -> String {
    format!("{}/mentor/{}/team/{}", API_PREFIX, mentor_id, team_id)
}

impl ApiClient {
    pub async fn list_mentor_ids(&self) -> Result<Vec<i32>, ClientError> {
        self.read(&mentors_path()).await
    }

    pub async fn get_mentor(&self, id: i32) -> Result<MentorDetail, ClientError> {
        self.read(&mentor_path(id)).await
    }

    /// Create a mentor and return its ID
    pub async fn create_mentor(&self, fullname: &str, specialization: &str) -> Result<i32, ClientError> {
        let created: CreatedResponse = self
            .create(&mentors_path(), &CreateMentorRequest::new(fullname, specialization))
            .await?;
        Ok(created.id)
    }

    pub async fn update_mentor(&self, id: i32, changes: &UpdateMentorRequest) -> Result<(), ClientError> {
        let _: StatusMessage = self.update(&mentor_path(id), changes).await?;
        Ok(())
    }

    pub async fn delete_mentor(&self, id: i32) -> Result<(), ClientError> {
        let _: StatusMessage = self.delete(&mentor_path(id)).await?;
        Ok(())
    }

    pub async fn list_team_ids(&self, mentor_id: i32) -> Result<Vec<i32>, ClientError> {
        self.read(&teams_path(mentor_id)).await
    }

    pub async fn get_team(&self, mentor_id: i32, team_id: i32) -> Result<TeamDetail, ClientError> {
        self.read(&team_path(mentor_id, team_id)).await
    }

    /// Create a team with its members and return the team ID
    pub async fn create_team(&self, mentor_id: i32, team: &CreateTeamRequest) -> Result<i32, ClientError> {
        let created: CreatedResponse = self.create(&teams_path(mentor_id), team).await?;
        Ok(created.id)
    }

    pub async fn update_team(
        &self,
        mentor_id: i32,
        team_id: i32,
        changes: &UpdateTeamRequest,
    ) -> Result<(), ClientError> {
        let _: StatusMessage = self.update(&team_path(mentor_id, team_id), changes).await?;
        Ok(())
    }

    pub async fn delete_team(&self, mentor_id: i32, team_id: i32) -> Result<(), ClientError> {
        let _: StatusMessage = self.delete(&team_path(mentor_id, team_id)).await?;
        Ok(())
    }

    /// Replace the team's member list; the server answers without a body
    pub async fn replace_team_members(
        &self,
        mentor_id: i32,
        team_id: i32,
        members: Vec<String>,
    ) -> Result<(), ClientError> {
        let path = format!("{}/members", team_path(mentor_id, team_id));
        self.create(&path, &ReplaceMembersRequest { members }).await
    }
}
