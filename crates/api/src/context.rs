use chipreg_core::UserId;

/// Authenticated caller of a request, taken from a verified bearer token.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
}

impl PrincipalContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
