use crate::config::{AuthConfig, AuthMode};

/// The book routes, named for consultation against an [`AuthPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookRoute {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Which book routes demand a bearer token.
///
/// Derived once at startup from the auth configuration and baked into
/// the router, so per-request dispatch never re-reads config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// No route is gated. Used when auth is not configured.
    Open,
    /// Only book creation is gated.
    CreateOnly,
    /// Every book route is gated.
    AllRoutes,
}

impl AuthPolicy {
    /// Derive the policy from the (optional) auth configuration.
    pub fn from_config(auth: Option<&AuthConfig>) -> Self {
        match auth {
            None => AuthPolicy::Open,
            Some(config) => match config.mode {
                AuthMode::CreateOnly => AuthPolicy::CreateOnly,
                AuthMode::AllRoutes => AuthPolicy::AllRoutes,
            },
        }
    }

    /// Whether `route` requires a verified bearer token.
    pub fn requires_token(self, route: BookRoute) -> bool {
        match self {
            AuthPolicy::Open => false,
            AuthPolicy::CreateOnly => route == BookRoute::Create,
            AuthPolicy::AllRoutes => true,
        }
    }
}
