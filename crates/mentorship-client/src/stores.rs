//! Client-side state stores
//!
//! Both stores publish through `tokio::sync::watch` so a UI can subscribe and
//! re-render on change.

use std::collections::HashSet;
use std::sync::Arc;

use mentorship_proto::{CreateTeamRequest, MentorDetail, TeamDetail, UpdateMentorRequest, UpdateTeamRequest};
use tokio::sync::watch;
use tracing::debug;

use crate::client::{ApiClient, ClientError};
use crate::notify::Notifier;

/// Cached set of mentor IDs, updated in place on add/remove
pub struct MentorDirectory {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    mentors: watch::Sender<HashSet<i32>>,
}

impl MentorDirectory {
    /// Create an empty directory; call [`reload`](Self::reload) to populate it
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let (mentors, _) = watch::channel(HashSet::new());
        Self {
            client,
            notifier,
            mentors,
        }
    }

    /// Create a directory and load it from the server once
    pub async fn load(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let directory = Self::new(client, notifier);
        directory.reload().await;
        directory
    }

    /// Snapshot of the cached IDs
    pub fn mentor_ids(&self) -> HashSet<i32> {
        self.mentors.borrow().clone()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.mentors.borrow().contains(&id)
    }

    pub fn subscribe(&self) -> watch::Receiver<HashSet<i32>> {
        self.mentors.subscribe()
    }

    /// Clear the cache and refetch every ID
    ///
    /// On failure the cache stays empty and the user is notified.
    pub async fn reload(&self) {
        self.mentors.send_replace(HashSet::new());

        match self.client.list_mentor_ids().await {
            Ok(ids) => {
                debug!("Loaded {} mentor id(s)", ids.len());
                self.mentors.send_replace(ids.into_iter().collect());
            }
            Err(e) => {
                self.notifier
                    .show(&format!("Unable to connect to the server: {}", e), true);
            }
        }
    }

    pub async fn add_mentor(
        &self,
        fullname: &str,
        specialization: &str,
    ) -> Result<MentorDetail, ClientError> {
        let id = self.client.create_mentor(fullname, specialization).await?;
        self.mentors.send_modify(|ids| {
            ids.insert(id);
        });

        Ok(MentorDetail {
            id,
            fullname: fullname.to_string(),
            specialization: specialization.to_string(),
            teams: Vec::new(),
        })
    }

    pub async fn get_mentor_by_id(&self, id: i32) -> Result<MentorDetail, ClientError> {
        self.client.get_mentor(id).await
    }

    /// Drop the ID from the cache, then delete on the server
    ///
    /// Subscribers see the removal before the request completes; a failed
    /// delete puts the ID back.
    pub async fn remove_mentor_by_id(&self, id: i32) -> Result<(), ClientError> {
        let was_cached = self.mentors.send_if_modified(|ids| ids.remove(&id));

        if let Err(e) = self.client.delete_mentor(id).await {
            if was_cached {
                self.mentors.send_modify(|ids| {
                    ids.insert(id);
                });
            }
            return Err(e);
        }
        Ok(())
    }

    pub async fn update_mentor(&self, mentor: &MentorDetail) -> Result<(), ClientError> {
        let changes = UpdateMentorRequest {
            fullname: Some(mentor.fullname.clone()),
            specialization: Some(mentor.specialization.clone()),
        };
        self.client.update_mentor(mentor.id, &changes).await
    }

    pub async fn add_team(
        &self,
        mentor_id: i32,
        members: Vec<String>,
        project: &str,
        specialization: &str,
    ) -> Result<TeamDetail, ClientError> {
        let request = CreateTeamRequest::new(project, specialization, members);
        let id = self.client.create_team(mentor_id, &request).await?;

        Ok(TeamDetail {
            id,
            project: project.to_string(),
            specialization: specialization.to_string(),
            members: request.members,
        })
    }

    pub async fn remove_team_by_id(&self, mentor_id: i32, team_id: i32) -> Result<(), ClientError> {
        self.client.delete_team(mentor_id, team_id).await
    }

    /// Update the team's fields, then replace its member list
    pub async fn update_team(&self, mentor_id: i32, team: &TeamDetail) -> Result<(), ClientError> {
        let changes = UpdateTeamRequest {
            project: Some(team.project.clone()),
            specialization: Some(team.specialization.clone()),
        };
        self.client.update_team(mentor_id, team.id, &changes).await?;
        self.client
            .replace_team_members(mentor_id, team.id, team.members.clone())
            .await
    }

    pub async fn get_team_by_id(&self, mentor_id: i32, team_id: i32) -> Result<TeamDetail, ClientError> {
        self.client.get_team(mentor_id, team_id).await
    }
}

/// The mentor currently on display, fetched on demand
pub struct SelectedMentor {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    selected: watch::Sender<Option<MentorDetail>>,
}

impl SelectedMentor {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let (selected, _) = watch::channel(None);
        Self {
            client,
            notifier,
            selected,
        }
    }

    pub fn current(&self) -> Option<MentorDetail> {
        self.selected.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<MentorDetail>> {
        self.selected.subscribe()
    }

    /// Fetch the mentor and publish it
    ///
    /// On failure the previous selection is kept and the user is notified.
    pub async fn select(&self, id: i32) -> bool {
        match self.client.get_mentor(id).await {
            Ok(mentor) => {
                self.selected.send_replace(Some(mentor));
                true
            }
            Err(e) => {
                self.notifier
                    .show(&format!("Unable to load mentor {}: {}", id, e), true);
                false
            }
        }
    }

    pub fn clear(&self) {
        self.selected.send_replace(None);
    }
}
