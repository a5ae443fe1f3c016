//! Group types: capacity-bounded collaboration units with an
//! applicant queue.

use chrono::{DateTime, Utc};

use super::{ApplicantId, GroupId};

/// Group record with its membership and applicant queue resolved.
///
/// `members` preserves insertion order; the creator is always the
/// first member.
#[derive(Clone, Debug)]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub created_date: String,
    pub creator: String,
    pub description: String,
    pub avatar: String,
    pub member_limit: i64,
    pub members: Vec<String>,
    pub applicants: Vec<Applicant>,
}

impl Group {
    /// Capacity check: a group is full when membership has reached its
    /// limit.
    pub fn is_full(&self) -> bool {
        self.members.len() as i64 >= self.member_limit
    }
}

/// A submitted request to join a group. Retained after decision.
#[derive(Clone, Debug)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Lifecycle of an application: pending until a moderation decision
/// moves it to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Unknown application status: {}", s)),
        }
    }
}

/// Moderation decision on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantDecision {
    Accept,
    Reject,
}

/// Parameters for creating a group.
#[derive(Clone, Debug)]
pub struct CreateGroupParams {
    pub title: String,
    pub created_date: String,
    pub creator: String,
    pub description: String,
    pub avatar: String,
    /// Initial members in order; expected to contain the creator first.
    pub members: Vec<String>,
    pub member_limit: i64,
}

/// Parameters for submitting an application.
#[derive(Clone, Debug)]
pub struct ApplicantParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume: String,
}
