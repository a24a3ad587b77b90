//! Groups API.

use crate::client::{SignalClient, NO_BODY};
use crate::error::Result;
use crate::types::{
    CreateGroupRequest, CreateGroupResponse, Group, GroupAdminsRequest, GroupMembersRequest,
    UpdateGroupRequest,
};

/// Groups of one account.
pub struct GroupsApi {
    client: SignalClient,
    number: String,
}

impl GroupsApi {
    pub(crate) fn new(client: SignalClient, number: String) -> Self {
        Self { client, number }
    }

    fn path(&self, group_id: &str, action: &str) -> String {
        format!("/v1/groups/{}/{}{}", self.number, group_id, action)
    }

    /// List all groups.
    pub async fn list(&self) -> Result<Vec<Group>> {
        self.client
            .get(&format!("/v1/groups/{}", self.number))
            .await
    }

    /// Create a group; returns its ID.
    pub async fn create(&self, request: &CreateGroupRequest) -> Result<String> {
        let response: CreateGroupResponse = self
            .client
            .post(&format!("/v1/groups/{}", self.number), request)
            .await?;
        Ok(response.id)
    }

    /// Get a group by ID.
    pub async fn get(&self, group_id: &str) -> Result<Group> {
        self.client.get(&self.path(group_id, "")).await
    }

    /// Update name, description or avatar.
    pub async fn update(&self, group_id: &str, request: &UpdateGroupRequest) -> Result<()> {
        self.client.put(&self.path(group_id, ""), Some(request)).await
    }

    /// Delete a group.
    pub async fn delete(&self, group_id: &str) -> Result<()> {
        self.client.delete(&self.path(group_id, ""), NO_BODY).await
    }

    /// Promote members to admins.
    pub async fn add_admins(&self, group_id: &str, admins: Vec<String>) -> Result<()> {
        let request = GroupAdminsRequest { admins };
        self.client
            .post_unit(&self.path(group_id, "/admins"), Some(&request))
            .await
    }

    /// Demote admins.
    pub async fn remove_admins(&self, group_id: &str, admins: Vec<String>) -> Result<()> {
        let request = GroupAdminsRequest { admins };
        self.client
            .delete(&self.path(group_id, "/admins"), Some(&request))
            .await
    }

    /// Block a group.
    pub async fn block(&self, group_id: &str) -> Result<()> {
        self.client
            .post_unit(&self.path(group_id, "/block"), NO_BODY)
            .await
    }

    /// Join a group.
    pub async fn join(&self, group_id: &str) -> Result<()> {
        self.client
            .post_unit(&self.path(group_id, "/join"), NO_BODY)
            .await
    }

    /// Add members.
    pub async fn add_members(&self, group_id: &str, members: Vec<String>) -> Result<()> {
        let request = GroupMembersRequest { members };
        self.client
            .post_unit(&self.path(group_id, "/members"), Some(&request))
            .await
    }

    /// Remove members.
    pub async fn remove_members(&self, group_id: &str, members: Vec<String>) -> Result<()> {
        let request = GroupMembersRequest { members };
        self.client
            .delete(&self.path(group_id, "/members"), Some(&request))
            .await
    }

    /// Leave a group.
    pub async fn quit(&self, group_id: &str) -> Result<()> {
        self.client
            .post_unit(&self.path(group_id, "/quit"), NO_BODY)
            .await
    }
}
