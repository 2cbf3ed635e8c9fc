use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One entry of the `/series/` metadata listing.
///
/// Ids are kept as opaque strings. The API serializes some of them as JSON
/// numbers, so both forms are accepted and normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesMetadata {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_id_list")]
    pub domain_ids: Vec<String>,
    #[serde(deserialize_with = "de_id")]
    pub dataset_id: String,
    pub label: String,
}

/// Where the observations of a set of series live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DatasetLocation {
    pub domain_id: String,
    pub dataset_id: String,
}

/// Serde helper: parse an identifier from either a JSON string or a number.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer identifier")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Deserialize)]
struct Id(#[serde(deserialize_with = "de_id")] String);

fn de_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<Id>::deserialize(deserializer)?;
    Ok(ids.into_iter().map(|Id(s)| s).collect())
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<Id>::deserialize(deserializer)?;
    Ok(id.map(|Id(s)| s))
}

/// A JSON-stat 2.0 `dataset` response, as returned by
/// `/domains/{domain}/datasets/{dataset}/`.
///
/// Only the members needed to flatten it into a table are modelled; the rest
/// (`extension`, `updated`, `note`...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonStatDataset {
    #[serde(default)]
    pub label: Option<String>,
    /// Dimension ids in storage order (last one varies fastest in `value`).
    pub id: Vec<String>,
    pub size: Vec<usize>,
    #[serde(default)]
    pub role: Role,
    pub dimension: BTreeMap<String, Dimension>,
    pub value: Values,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Role {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub geo: Vec<String>,
    #[serde(default)]
    pub metric: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimension {
    #[serde(default)]
    pub label: Option<String>,
    pub category: Category,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub index: Option<CategoryIndex>,
    #[serde(default)]
    pub label: BTreeMap<String, String>,
}

/// JSON-stat allows the category order either as an array of ids or as an
/// object mapping id to position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryIndex {
    List(Vec<String>),
    Positions(BTreeMap<String, usize>),
}

/// Dense array (with `null` holes) or sparse object keyed by flat position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Values {
    Dense(Vec<Option<f64>>),
    Sparse(BTreeMap<String, Option<f64>>),
}

impl Dimension {
    /// Display label, falling back to the dimension id when the dataset omits it.
    pub fn label_or<'a>(&'a self, id: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(id)
    }
}

impl Category {
    /// Category ids in storage order.
    ///
    /// A missing `index` is only legal for single-category dimensions, in which
    /// case the lone `label` key is the id.
    pub fn ordered_ids(&self) -> Vec<String> {
        match &self.index {
            Some(CategoryIndex::List(ids)) => ids.clone(),
            Some(CategoryIndex::Positions(positions)) => {
                let mut pairs: Vec<(&String, &usize)> = positions.iter().collect();
                pairs.sort_by_key(|(_, pos)| **pos);
                pairs.into_iter().map(|(id, _)| id.clone()).collect()
            }
            None => self.label.keys().cloned().collect(),
        }
    }

    /// Display label of a category, falling back to its id.
    pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.label.get(id).map(String::as_str).unwrap_or(id)
    }
}
