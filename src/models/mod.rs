use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a JSON string, number or null and normalizes it to a string.
///
/// The backend serializes ids as integers on some routes and as strings on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Nullable text column; null and missing both become "".
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Roster entry. `id` is the roster row key, `user_id` is what a brevet's
/// `id_user` list refers to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Member {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
}

/// Patent/publication record as served by `/api/brevets`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Brevet {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub doi: String,

    /// Display names joined with `", "`.
    #[serde(default, deserialize_with = "string_or_null")]
    pub author: String,

    /// Member `user_id`s joined with `","`, aligned with `author`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id_user: String,
}

/// One selected author: the member id and the name shown for it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct AuthorRef {
    pub user_id: String,
    pub name: String,
}

impl AuthorRef {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

impl From<&Member> for AuthorRef {
    fn from(m: &Member) -> Self {
        Self::new(m.user_id.clone(), m.name.clone())
    }
}
