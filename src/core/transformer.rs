use crate::domain::model::{Key, KeyStatus, OwnerGroups, OwnerKey, SourceKey, Tier, User};
use crate::domain::ports::Placeholders;
use crate::utils::error::{MigrationError, Result};

pub const DUMMY_USER_NAME: &str = "Dummy User";
const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Turns owner groups into destination users, one per group, in group order.
pub fn convert_groups<P: Placeholders + ?Sized>(
    groups: &OwnerGroups,
    placeholders: &P,
) -> Result<Vec<User>> {
    let mut users = Vec::with_capacity(groups.len());

    for (owner, keys) in groups {
        let mut user = match owner {
            OwnerKey::Unowned => dummy_user(placeholders),
            OwnerKey::Email(_) => owner_user(keys),
        };
        user.keys = keys.iter().map(convert_key).collect::<Result<Vec<_>>>()?;
        users.push(user);
    }

    tracing::info!("Converted {} users", users.len());
    Ok(users)
}

fn dummy_user<P: Placeholders + ?Sized>(placeholders: &P) -> User {
    User {
        name: DUMMY_USER_NAME.to_string(),
        email: format!("dummy-user-{}@example.com", placeholders.dummy_suffix()),
        company_name: String::new(),
        company_url: String::new(),
        created_at: placeholders.now().format(CREATED_AT_FORMAT).to_string(),
        keys: Vec::new(),
    }
}

// Identity comes from the first key only; later keys of the same owner
// contribute nothing but their key.
fn owner_user(keys: &[SourceKey]) -> User {
    let member = keys
        .first()
        .and_then(|key| key.member.clone())
        .unwrap_or_default();

    User {
        name: format!("{} {}", member.first_name, member.last_name),
        email: member.email,
        company_name: member.company,
        company_url: member.uri,
        created_at: member.created,
        keys: Vec::new(),
    }
}

pub fn convert_key(source: &SourceKey) -> Result<Key> {
    let (product_name, product_url) = match &source.application {
        Some(app) => (app.name.clone(), app.uri.clone()),
        None => (String::new(), String::new()),
    };

    Ok(Key {
        key: source.apikey.clone(),
        product_name,
        product_url,
        requests_per_day: required_ceiling(source, "day")?,
        requests_per_minute: per_minute(source)?,
        tier: tier_of(source),
        status: KeyStatus::from_source(&source.status),
        created_at: source.created.clone(),
    })
}

fn required_ceiling(source: &SourceKey, period: &str) -> Result<u64> {
    source
        .ceiling_for(period)
        .ok_or_else(|| MigrationError::LookupError {
            apikey: source.apikey.clone(),
            period: period.to_string(),
        })
}

fn per_minute(source: &SourceKey) -> Result<u64> {
    let per_second = required_ceiling(source, "second")?;
    per_second
        .checked_mul(60)
        .ok_or_else(|| MigrationError::InvalidLimit {
            apikey: source.apikey.clone(),
            period: "second".to_string(),
            ceiling: per_second,
        })
}

fn tier_of(source: &SourceKey) -> Tier {
    match source.developer_class_name() {
        Some(name) => Tier::from_class_name(name).unwrap_or_else(|| {
            tracing::warn!(
                "Key {} has unrecognised developer class '{}', defaulting to Developer",
                source.apikey,
                name
            );
            Tier::Developer
        }),
        None => {
            tracing::warn!(
                "Key {} has no developer class, defaulting to Developer",
                source.apikey
            );
            Tier::Developer
        }
    }
}
