use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn path(self) -> &'static str {
        match self {
            Role::User => "/user",
            Role::Admin => "/admin",
        }
    }

    /// The role whose page is served at `path`, ignoring a trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        [Role::User, Role::Admin]
            .into_iter()
            .find(|role| role.path() == path.trim_end_matches('/'))
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_route_to_their_pages() {
        assert_eq!("User".parse::<Role>().map(Role::path), Ok("/user"));
        assert_eq!(" ADMIN ".parse::<Role>().map(Role::path), Ok("/admin"));
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn paths_map_back_to_roles() {
        assert_eq!(Role::from_path("/user"), Some(Role::User));
        assert_eq!(Role::from_path("/admin/"), Some(Role::Admin));
        assert_eq!(Role::from_path("/"), None);
        assert_eq!(Role::from_path("/user/settings"), None);
    }
}
