//! The identity payload carried inside a bearer token.

use serde::{Deserialize, Serialize};

use super::{Role, User};
use crate::domain::foundation::UserId;

/// Minimal identity of an authenticated caller.
///
/// Deliberately excludes the password hash, verification state and billing
/// flags. Because it is decoded without a store lookup, a principal may lag
/// behind the account it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::NewUser;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn principal_serializes_exactly_four_fields() {
        let user = NewUser::with_password("a@x.com", "Alice", "secret-hash")
            .into_user(UserId::new("u-1").unwrap(), Timestamp::now());

        let json = serde_json::to_value(Principal::from(&user)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(json["id"], "u-1");
        assert_eq!(json["fullName"], "Alice");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "CUSTOMER");
    }
}
