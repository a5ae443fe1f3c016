//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the server depends on.
///
/// Group membership and applicants live in child tables, so appends
/// are plain unique-constrained inserts; no method requires a
/// read-modify-write cycle on the caller's side.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Groups ─────────────────────────────────────

    /// Create a new group with its initial members (returns generated ID).
    async fn create_group(&self, params: &CreateGroupParams) -> Result<GroupId, StoreError>;

    /// Get group by ID, with members and applicants resolved.
    async fn get_group(&self, group_id: &GroupId) -> Result<Group, StoreError>;

    /// Get group by title. Titles are unique, so this is the wire-level
    /// lookup key.
    async fn get_group_by_title(&self, title: &str) -> Result<Group, StoreError>;

    /// List all groups with members and applicants resolved.
    async fn list_groups(&self) -> Result<Vec<Group>, StoreError>;

    /// Replace a group's description. Nothing else is touched.
    async fn update_group_description(
        &self,
        group_id: &GroupId,
        description: &str,
    ) -> Result<(), StoreError>;

    /// Delete a group by title (memberships and applicants cascade).
    /// Returns the number of rows removed; deleting a missing title is
    /// not an error.
    async fn delete_group_by_title(&self, title: &str) -> Result<u64, StoreError>;

    // ───────────────────────────────────── Applications ─────────────────────────────────────

    /// Append an application to a group's queue. Fails with
    /// `AlreadyExists` if this email already applied to the group.
    async fn add_applicant(
        &self,
        group_id: &GroupId,
        params: &ApplicantParams,
    ) -> Result<ApplicantId, StoreError>;

    /// Decide a pending application. Accepting enforces the capacity
    /// invariant and moves the applicant into the member list, all in
    /// one transaction. Fails with `Conflict` if the application was
    /// already decided or the group is full.
    async fn decide_applicant(
        &self,
        group_id: &GroupId,
        email: &str,
        decision: ApplicantDecision,
    ) -> Result<(), StoreError>;

    /// Count current members of a group.
    async fn count_members(&self, group_id: &GroupId) -> Result<i64, StoreError>;

    // ───────────────────────────────────── Users ─────────────────────────────────────

    /// Create a new user (returns generated ID). Fails with
    /// `AlreadyExists` on a duplicate email.
    async fn create_user(&self, params: &CreateUserParams) -> Result<UserId, StoreError>;

    /// Get user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    // ───────────────────────────────────── Messages ─────────────────────────────────────

    /// Record a contact-form message (returns generated ID).
    async fn create_message(&self, params: &CreateMessageParams) -> Result<MessageId, StoreError>;
}
