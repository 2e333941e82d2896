use crate::domain::model::{OwnerGroups, OwnerKey, SourceKey};

/// Groups keys by owner email. Keys without a member land in the
/// `OwnerKey::Unowned` group. Groups keep first-seen order and members keep
/// input order.
pub fn group_by_owner(keys: Vec<SourceKey>) -> OwnerGroups {
    let mut groups = OwnerGroups::new();

    for key in keys {
        let owner = key.owner_key();
        if owner == OwnerKey::Unowned {
            tracing::info!("Note: key {} does not have a user", key.apikey);
        }
        groups.entry(owner).or_default().push(key);
    }

    tracing::info!("Keys are owned by {} different users", groups.len());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn key(apikey: &str, email: Option<&str>) -> SourceKey {
        let mut value = json!({ "apikey": apikey });
        if let Some(email) = email {
            value["member"] = json!({ "email": email });
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let groups = group_by_owner(vec![
            key("1", Some("b@x.com")),
            key("2", Some("a@x.com")),
            key("3", Some("b@x.com")),
            key("4", None),
            key("5", Some("a@x.com")),
        ]);

        let owners: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(owners, vec!["b@x.com", "a@x.com", "None"]);

        let b: Vec<&str> = groups[&OwnerKey::Email("b@x.com".into())]
            .iter()
            .map(|k| k.apikey.as_str())
            .collect();
        assert_eq!(b, vec!["1", "3"]);
    }

    #[test]
    fn test_every_key_lands_in_exactly_one_group() {
        let input = vec![
            key("1", None),
            key("2", Some("a@x.com")),
            key("3", None),
            key("4", Some("c@x.com")),
        ];

        let groups = group_by_owner(input);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, 4);
        assert_eq!(groups[&OwnerKey::Unowned].len(), 2);
    }

    #[test]
    fn test_email_named_none_is_not_the_sentinel() {
        let groups = group_by_owner(vec![key("1", Some("None")), key("2", None)]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    #[traced_test]
    fn test_each_ownerless_key_is_noted() {
        group_by_owner(vec![key("orphan-1", None), key("owned", Some("a@x.com")), key("orphan-2", None)]);

        assert!(logs_contain("Note: key orphan-1 does not have a user"));
        assert!(logs_contain("Note: key orphan-2 does not have a user"));
        assert!(!logs_contain("Note: key owned"));
        assert!(logs_contain("Keys are owned by 2 different users"));
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_owner(Vec::new()).is_empty());
    }
}
