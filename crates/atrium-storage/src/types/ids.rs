//! Strongly-typed identifiers (avoid mixing strings arbitrarily).

use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApplicantId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);
