//! User record and request payload.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Persisted user row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: i32,
    pub created: DateTime<Utc>,
}

impl User {
    /// New record with a freshly minted id and creation time.
    /// `created` is truncated to microseconds, the resolution PostgreSQL stores.
    pub fn create(request: UserRequest) -> Self {
        User {
            id: Uuid::new_v4(),
            firstname: request.firstname,
            lastname: request.lastname,
            email: request.email,
            age: request.age,
            created: Utc::now().trunc_subsecs(6),
        }
    }

    /// Candidate for an update of `id`. `created` is ignored by the store.
    pub fn edit(id: Uuid, request: UserRequest) -> Self {
        User {
            id,
            firstname: request.firstname,
            lastname: request.lastname,
            email: request.email,
            age: request.age,
            created: DateTime::default(),
        }
    }
}

/// Body of create and update requests. Absent or `null` fields decode as
/// empty and are reported by validation rather than by the decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub firstname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lastname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ivan() -> UserRequest {
        UserRequest {
            firstname: "Ivan".into(),
            lastname: "Ivanov".into(),
            email: "ivan@example.com".into(),
            age: 30,
        }
    }

    #[test]
    fn create_mints_distinct_ids() {
        let a = User::create(ivan());
        let b = User::create(ivan());
        assert_ne!(a.id, b.id);
        assert_eq!(a.firstname, "Ivan");
        assert_eq!(a.created.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn missing_fields_decode_to_empty_values() {
        let req: UserRequest = serde_json::from_str(r#"{"firstname":"Ivan"}"#).unwrap();
        assert_eq!(req.firstname, "Ivan");
        assert_eq!(req.lastname, "");
        assert_eq!(req.age, 0);
    }

    #[test]
    fn null_fields_decode_to_empty_values() {
        let req: UserRequest =
            serde_json::from_str(r#"{"firstname":null,"lastname":"Ivanov","email":null,"age":null}"#).unwrap();
        assert_eq!(req.firstname, "");
        assert_eq!(req.lastname, "Ivanov");
        assert_eq!(req.email, "");
        assert_eq!(req.age, 0);
    }

    #[test]
    fn age_outside_integer_column_range_fails_to_decode() {
        assert!(serde_json::from_str::<UserRequest>(r#"{"age":3000000000}"#).is_err());
    }

    #[test]
    fn user_serializes_with_plain_field_names() {
        let user = User::create(ivan());
        let json = serde_json::to_value(&user).unwrap();
        for field in ["id", "firstname", "lastname", "email", "age", "created"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
