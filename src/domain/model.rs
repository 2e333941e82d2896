use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One key record from the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceKey {
    pub apikey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limits: Vec<Limit>,
    #[serde(default)]
    pub developer_class: Option<DeveloperClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub period: String,
    pub ceiling: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeveloperClass {
    #[serde(default)]
    pub name: Option<String>,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceKey {
    /// Ceiling of the first limit whose period matches, if any.
    pub fn ceiling_for(&self, period: &str) -> Option<u64> {
        self.limits
            .iter()
            .find(|limit| limit.period == period)
            .map(|limit| limit.ceiling)
    }

    pub fn developer_class_name(&self) -> Option<&str> {
        self.developer_class
            .as_ref()
            .and_then(|class| class.name.as_deref())
    }

    pub fn owner_key(&self) -> OwnerKey {
        match &self.member {
            Some(member) => OwnerKey::Email(member.email.clone()),
            None => OwnerKey::Unowned,
        }
    }
}

/// Grouping key for source records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    Unowned,
    Email(String),
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerKey::Unowned => f.write_str("None"),
            OwnerKey::Email(email) => f.write_str(email),
        }
    }
}

/// Source records by owner, in first-seen order.
pub type OwnerGroups = IndexMap<OwnerKey, Vec<SourceKey>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub company_url: String,
    pub created_at: String,
    pub keys: Vec<Key>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub key: String,
    pub product_name: String,
    pub product_url: String,
    pub requests_per_day: u64,
    pub requests_per_minute: u64,
    pub tier: Tier,
    pub status: KeyStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Developer,
    Internal,
    RightsManaged,
}

impl Tier {
    /// Maps a developer class name; `None` for anything unrecognised.
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "developer" => Some(Tier::Developer),
            "internal" => Some(Tier::Internal),
            "rights-managed" => Some(Tier::RightsManaged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl KeyStatus {
    pub fn from_source(status: &str) -> Self {
        if status == "active" {
            KeyStatus::Active
        } else {
            KeyStatus::Inactive
        }
    }
}

/// Totals reported once every batch has been handed to the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub batches: usize,
    pub users: usize,
    pub keys: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_record_deserializes() {
        let key: SourceKey = serde_json::from_value(json!({
            "apikey": "k1",
            "developer_class": null,
            "extra": "ignored"
        }))
        .unwrap();

        assert_eq!(key.apikey, "k1");
        assert!(key.member.is_none());
        assert!(key.developer_class.is_none());
        assert!(key.limits.is_empty());
        assert_eq!(key.owner_key(), OwnerKey::Unowned);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let key: SourceKey = serde_json::from_value(json!({
            "apikey": "k1",
            "status": null,
            "created": null,
            "limits": null,
            "application": {"name": "Content API", "uri": null},
            "member": {
                "email": null,
                "first_name": "A",
                "last_name": null,
                "company": null,
                "uri": null,
                "created": null
            }
        }))
        .unwrap();

        assert_eq!(key.status, "");
        assert_eq!(key.created, "");
        assert!(key.limits.is_empty());
        assert_eq!(key.application.as_ref().unwrap().uri, "");

        let member = key.member.as_ref().unwrap();
        assert_eq!(member.email, "");
        assert_eq!(member.first_name, "A");
        assert_eq!(member.company, "");
        assert_eq!(key.owner_key(), OwnerKey::Email(String::new()));
    }

    #[test]
    fn test_ceiling_lookup_uses_first_match() {
        let key: SourceKey = serde_json::from_value(json!({
            "apikey": "k1",
            "limits": [
                {"period": "second", "ceiling": 5},
                {"period": "day", "ceiling": 1000},
                {"period": "day", "ceiling": 9}
            ]
        }))
        .unwrap();

        assert_eq!(key.ceiling_for("day"), Some(1000));
        assert_eq!(key.ceiling_for("second"), Some(5));
        assert_eq!(key.ceiling_for("hour"), None);
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!(KeyStatus::from_source("active"), KeyStatus::Active);
        assert_eq!(KeyStatus::from_source("Active"), KeyStatus::Inactive);
        assert_eq!(KeyStatus::from_source("disabled"), KeyStatus::Inactive);
    }

    #[test]
    fn test_owner_key_display() {
        assert_eq!(OwnerKey::Unowned.to_string(), "None");
        assert_eq!(OwnerKey::Email("a@x.com".into()).to_string(), "a@x.com");
    }

    #[test]
    fn test_key_serializes_camel_case() {
        let key = Key {
            key: "abc".into(),
            product_name: String::new(),
            product_url: String::new(),
            requests_per_day: 1000,
            requests_per_minute: 300,
            tier: Tier::RightsManaged,
            status: KeyStatus::Active,
            created_at: "2020-01-01T00:00:00Z".into(),
        };

        let value = serde_json::to_value(&key).unwrap();
        assert_eq!(value["requestsPerDay"], 1000);
        assert_eq!(value["requestsPerMinute"], 300);
        assert_eq!(value["tier"], "RightsManaged");
        assert_eq!(value["status"], "Active");
        assert_eq!(value["createdAt"], "2020-01-01T00:00:00Z");
    }
}
