//! Cache Key Builder
//!
//! Deterministic keys for single-entity lookups (`{entity}:item:{id}`) and
//! collection queries (`{entity}:list:{sorted-query}`).

use std::collections::BTreeMap;
use std::fmt;

// == Entity ==
/// Entity types whose responses are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Organization,
    User,
    Order,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Organization => "organization",
            Entity::User => "user",
            Entity::Order => "order",
        }
    }
}

impl AsRef<str> for Entity {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Item Key ==
/// Key for a single entity instance.
pub fn item_key(entity: impl AsRef<str>, id: impl AsRef<str>) -> String {
    format!("{}:item:{}", entity.as_ref(), id.as_ref())
}

// == List Prefix ==
/// Prefix shared by every list key of an entity type.
pub fn list_prefix(entity: impl AsRef<str>) -> String {
    format!("{}:list", entity.as_ref())
}

// == List Key ==
/// Key for a collection query.
///
/// Parameters with an absent or empty value are dropped; the rest are sorted
/// by name, percent-encoded and joined as `name=value` pairs with `&`. When a
/// name repeats, the last value wins.
///
/// ```
/// use tenant_orders::cache::list_key;
///
/// let key = list_key("order", [("page", Some("2")), ("limit", Some("10")), ("q", None)]);
/// assert_eq!(key, "order:list:limit=10&page=2");
/// ```
pub fn list_key<I, K, V>(entity: impl AsRef<str>, params: I) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: ToString,
{
    let present: BTreeMap<String, String> = params
        .into_iter()
        .filter_map(|(name, value)| {
            let value = value?.to_string();
            (!value.is_empty()).then(|| (name.as_ref().to_string(), value))
        })
        .collect();

    let prefix = list_prefix(entity);
    if present.is_empty() {
        return prefix;
    }

    let query = present
        .iter()
        .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{prefix}:{query}")
}
