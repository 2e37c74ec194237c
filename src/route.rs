//! Hash Routing
//!
//! Three screens, addressed by `#/login`, `#/register` and `#/dashboard`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    /// Unknown or empty hashes land on the dashboard (and then the guard)
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let path = path.split(['?', '/']).next().unwrap_or_default();
        match path {
            "login" => Route::Login,
            "register" => Route::Register,
            _ => Route::Dashboard,
        }
    }

    pub fn hash(self) -> &'static str {
        match self {
            Route::Login => "#/login",
            Route::Register => "#/register",
            Route::Dashboard => "#/dashboard",
        }
    }

    /// Apply the session guard
    pub fn resolve(self, has_session: bool) -> Self {
        match (self, has_session) {
            (Route::Dashboard, false) => Route::Login,
            (Route::Login | Route::Register, true) => Route::Dashboard,
            (route, _) => route,
        }
    }
}

pub fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Point the address bar at `route` without reloading
pub fn set_hash(route: Route) {
    let Some(window) = web_sys::window() else { return };
    let location = window.location();
    if location.hash().ok().as_deref() != Some(route.hash()) {
        if location.set_hash(route.hash()).is_err() {
            log::warn!("[Route] Failed to update location hash");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hash() {
        assert_eq!(Route::from_hash("#/login"), Route::Login);
        assert_eq!(Route::from_hash("#register"), Route::Register);
        assert_eq!(Route::from_hash("#/login?next=files"), Route::Login);
        assert_eq!(Route::from_hash(""), Route::Dashboard);
        assert_eq!(Route::from_hash("#/nowhere"), Route::Dashboard);
    }

    #[test]
    fn test_guard() {
        assert_eq!(Route::Dashboard.resolve(false), Route::Login);
        assert_eq!(Route::Register.resolve(false), Route::Register);
        assert_eq!(Route::Login.resolve(true), Route::Dashboard);
        assert_eq!(Route::Register.resolve(true), Route::Dashboard);
        assert_eq!(Route::Dashboard.resolve(true), Route::Dashboard);
    }

    #[test]
    fn test_hash_round_trip() {
        for route in [Route::Login, Route::Register, Route::Dashboard] {
            assert_eq!(Route::from_hash(route.hash()), route);
        }
    }
}
