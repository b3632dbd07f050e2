use serde::{Deserialize, Serialize};

/// Access level required by an operation.
///
/// `Admin` grants everything `User` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn grants(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::User, Role::User) => true,
            (Role::User, Role::Admin) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().trim_start_matches("ROLE_") {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Authenticated caller (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn has_role(&self, required: Role) -> bool {
        self.roles.iter().any(|r| r.grants(required))
    }
}

/// JWT claims carried by bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub iat: usize,
    pub exp: usize,
}

impl From<Claims> for CurrentUser {
    fn from(c: Claims) -> Self {
        CurrentUser { id: c.uid, email: c.sub, roles: c.roles }
    }
}
