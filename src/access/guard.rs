use crate::access::role::{has_capability, Role, SessionUser};
use crate::config::GuardSettings;
use std::borrow::Cow;
use tracing::debug;

pub const TOKEN_COOKIE: &str = "access_token";
pub const ROLE_COOKIE: &str = "user_role";
pub const USER_ID_COOKIE: &str = "user_id";

/// Credentials recovered from the request cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    /// Parses a `Cookie:` header value. Returns `None` without a non-empty token.
    ///
    /// Values are percent-decoded; one that does not decode to UTF-8 is kept as sent.
    /// An unparseable role cookie leaves `role` empty rather than rejecting the session.
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        let mut token = None;
        let mut user_id = None;
        let mut role = None;

        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let raw = value.trim().trim_matches('"');
            let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
            let value = decoded.trim();
            match name.trim() {
                TOKEN_COOKIE if !value.is_empty() => token = Some(value.to_string()),
                USER_ID_COOKIE if !value.is_empty() => user_id = Some(value.to_string()),
                ROLE_COOKIE => role = value.parse::<Role>().ok(),
                _ => {}
            }
        }

        token.map(|token| Session {
            token,
            user_id,
            role,
        })
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.role.map(|role| SessionUser {
            id: self.user_id.clone().unwrap_or_default(),
            role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectSignIn(String),
    RedirectHome(String),
}

/// Role gating for route prefixes.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    rules: Vec<(String, Role)>,
    public: Vec<String>,
    sign_in_route: String,
    home_route: String,
}

impl RouteGuard {
    /// Guard with the dashboard rules: `/candidate`, `/company` and `/admin`.
    pub fn new(settings: &GuardSettings) -> Self {
        Self {
            rules: vec![
                ("/candidate".to_string(), Role::Candidate),
                ("/company".to_string(), Role::Company),
                ("/admin".to_string(), Role::Admin),
            ],
            public: vec![settings.sign_in_route.clone(), settings.home_route.clone()],
            sign_in_route: settings.sign_in_route.clone(),
            home_route: settings.home_route.clone(),
        }
    }

    pub fn with_rule(mut self, prefix: impl Into<String>, role: Role) -> Self {
        self.rules.push((prefix.into(), role));
        self
    }

    pub fn with_public(mut self, path: impl Into<String>) -> Self {
        self.public.push(path.into());
        self
    }

    /// Role required for `path`, if any. The longest matching prefix wins.
    ///
    /// Query string and fragment are ignored.
    pub fn required_role(&self, path: &str) -> Option<Role> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        if self.public.iter().any(|p| p == path) {
            return None;
        }
        self.rules
            .iter()
            .filter(|(prefix, _)| matches_prefix(path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, role)| *role)
    }

    pub fn evaluate(&self, path: &str, session: Option<&Session>) -> GuardDecision {
        let Some(required) = self.required_role(path) else {
            return GuardDecision::Allow;
        };

        let Some(session) = session else {
            debug!(path, %required, "No session, redirecting to sign-in");
            return GuardDecision::RedirectSignIn(self.sign_in_route.clone());
        };

        match session.user() {
            Some(user) if has_capability(&user, required) => GuardDecision::Allow,
            user => {
                debug!(
                    path,
                    %required,
                    role = ?user.map(|u| u.role),
                    "Missing capability, redirecting home"
                );
                GuardDecision::RedirectHome(self.home_route.clone())
            }
        }
    }
}

/// `/company` matches `/company` and `/company/jobs`, not `/companyx`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> RouteGuard {
        RouteGuard::new(&GuardSettings::default())
    }

    fn session(role: &str) -> Session {
        Session::from_cookie_header(&format!("access_token=abc; user_role={role}; user_id=u1"))
            .unwrap()
    }

    #[test]
    fn cookie_header_parsing() {
        let s = session("company");
        assert_eq!(s.token, "abc");
        assert_eq!(s.role, Some(Role::Company));
        assert_eq!(s.user(), Some(SessionUser::new("u1", Role::Company)));

        assert_eq!(Session::from_cookie_header("user_role=admin"), None);
        assert_eq!(Session::from_cookie_header("access_token=; user_role=admin"), None);
        assert_eq!(
            Session::from_cookie_header("access_token=t; user_role=pirate").map(|s| s.role),
            Some(None)
        );
    }

    #[test]
    fn cookie_values_are_percent_decoded() {
        let s = Session::from_cookie_header(
            "access_token=a%2Bb%3D%3D; user_role=Admin%20; user_id=u%201",
        )
        .unwrap();
        assert_eq!(s.token, "a+b==");
        assert_eq!(s.role, Some(Role::Admin));
        assert_eq!(s.user_id.as_deref(), Some("u 1"));

        // invalid UTF-8 after decoding falls back to the raw value
        let s = Session::from_cookie_header("access_token=%FF").unwrap();
        assert_eq!(s.token, "%FF");
    }

    #[test]
    fn unauthenticated_goes_to_sign_in() {
        assert_eq!(
            guard().evaluate("/candidate/applications", None),
            GuardDecision::RedirectSignIn("/sign-in".to_string())
        );
    }

    #[test]
    fn wrong_role_goes_home() {
        assert_eq!(
            guard().evaluate("/company/jobs", Some(&session("candidate"))),
            GuardDecision::RedirectHome("/".to_string())
        );
        // session without a role cookie
        let anonymous = Session::from_cookie_header("access_token=abc").unwrap();
        assert_eq!(
            guard().evaluate("/candidate", Some(&anonymous)),
            GuardDecision::RedirectHome("/".to_string())
        );
    }

    #[test]
    fn admin_passes_everywhere() {
        let admin = session("admin");
        for path in ["/candidate", "/company/jobs/1", "/admin/users"] {
            assert_eq!(guard().evaluate(path, Some(&admin)), GuardDecision::Allow);
        }
    }

    #[test]
    fn public_and_unguarded_paths_allow() {
        assert_eq!(guard().evaluate("/sign-in", None), GuardDecision::Allow);
        assert_eq!(guard().evaluate("/jobs/42", None), GuardDecision::Allow);
        assert_eq!(guard().evaluate("/companyx", None), GuardDecision::Allow);
    }

    #[test]
    fn longest_prefix_wins() {
        let guard = guard().with_rule("/company/admin-tools", Role::Admin);
        assert_eq!(guard.required_role("/company/admin-tools/x"), Some(Role::Admin));
        assert_eq!(guard.required_role("/company/jobs?page=2"), Some(Role::Company));
        let guard = guard.with_public("/company/about");
        assert_eq!(guard.required_role("/company/about"), None);
        assert_eq!(guard.required_role("/company/about?ref=x"), None);
        assert_eq!(guard.required_role("/company/about#team"), None);
        assert_eq!(guard.evaluate("/sign-in?next=/admin", None), GuardDecision::Allow);
    }
}
