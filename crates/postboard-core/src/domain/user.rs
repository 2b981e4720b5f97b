use serde::{Deserialize, Serialize};

use crate::ports::Id;

/// User - the actor behind authenticated requests and the author of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl User {
    /// Admin status comes from the superuser flag only.
    pub fn is_admin(&self) -> bool {
        self.is_superuser
    }
}

/// Fields for registering a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub is_superuser: bool,
}

impl NewUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_superuser: false,
        }
    }

    pub fn superuser(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_superuser: true,
        }
    }
}
