//! Ownership-based authorization
//!
//! A requester may modify a resource only if it created it. There are no
//! roles and no override.

use board_db::{Comment, Post};
use tracing::warn;
use uuid::Uuid;

use crate::error::AuthError;

/// A resource that records the account that created it
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Allow iff the requester is the owner
pub fn authorize(requester: Uuid, owner: Uuid) -> Result<(), AuthError> {
    if requester == owner {
        Ok(())
    } else {
        warn!("Account {} denied access to resource owned by {}", requester, owner);
        metrics::counter!("board_forbidden_total").increment(1);
        Err(AuthError::Forbidden)
    }
}

/// A loaded resource that passed the ownership check
#[derive(Debug)]
pub struct Authorized<T> {
    resource: T,
}

impl<T: Owned> Authorized<T> {
    pub(crate) fn check(requester: Uuid, resource: T) -> Result<Self, AuthError> {
        authorize(requester, resource.owner_id())?;
        Ok(Self { resource })
    }

    pub fn get(&self) -> &T {
        &self.resource
    }

    pub fn into_inner(self) -> T {
        self.resource
    }
}
