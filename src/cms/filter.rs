//! Filter expressions for collection queries
//!
//! A [`Filter`] is a small expression tree that encodes to the bracketed
//! query parameters the content API understands, e.g.
//! `filters[categories][documentId][$in][0]=abc`. `Filter::None` encodes
//! to no parameters at all, which is different from a filter that
//! matches nothing.

use indexmap::IndexMap;

/// A filter expression over collection fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// No filtering
    #[default]
    None,
    /// Field equals value
    Eq { field: FieldPath, value: String },
    /// Field contains value, case-insensitive
    ContainsI { field: FieldPath, value: String },
    /// Field is one of the values
    In { field: FieldPath, values: Vec<String> },
    /// Field lies in the inclusive range [low, high]
    Between {
        field: FieldPath,
        low: String,
        high: String,
    },
    /// All sub-filters hold
    And(Vec<Filter>),
    /// At least one sub-filter holds
    Or(Vec<Filter>),
}

/// Dotted path to a (possibly nested relation) field
pub type FieldPath = Vec<String>;

fn field(segments: &[&str]) -> FieldPath {
    segments.iter().map(|s| s.to_string()).collect()
}

impl Filter {
    /// Field equals value
    pub fn eq(segments: &[&str], value: impl Into<String>) -> Self {
        Filter::Eq {
            field: field(segments),
            value: value.into(),
        }
    }

    /// Case-insensitive containment
    pub fn contains_i(segments: &[&str], value: impl Into<String>) -> Self {
        Filter::ContainsI {
            field: field(segments),
            value: value.into(),
        }
    }

    /// Set membership
    pub fn is_in<I, S>(segments: &[&str], values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::In {
            field: field(segments),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Inclusive range
    pub fn between(segments: &[&str], low: impl Into<String>, high: impl Into<String>) -> Self {
        Filter::Between {
            field: field(segments),
            low: low.into(),
            high: high.into(),
        }
    }

    /// Conjunction of the given clauses, collapsing trivial cases
    pub fn all(clauses: Vec<Filter>) -> Self {
        let mut clauses: Vec<Filter> = clauses
            .into_iter()
            .filter(|c| !matches!(c, Filter::None))
            .collect();
        match clauses.len() {
            0 => Filter::None,
            1 => clauses.remove(0),
            _ => Filter::And(clauses),
        }
    }

    /// Disjunction of the given clauses, collapsing trivial cases
    pub fn any(clauses: Vec<Filter>) -> Self {
        let mut clauses: Vec<Filter> = clauses
            .into_iter()
            .filter(|c| !matches!(c, Filter::None))
            .collect();
        match clauses.len() {
            0 => Filter::None,
            1 => clauses.remove(0),
            _ => Filter::Or(clauses),
        }
    }

    /// Whether any filtering is active
    pub fn is_active(&self) -> bool {
        !matches!(self, Filter::None)
    }

    /// Encode into bracketed query parameters under `filters[...]`
    pub fn to_params(&self) -> IndexMap<String, String> {
        let mut params = IndexMap::new();
        self.encode("filters", &mut params);
        params
    }

    fn encode(&self, prefix: &str, params: &mut IndexMap<String, String>) {
        match self {
            Filter::None => {}
            Filter::Eq { field, value } => {
                params.insert(format!("{}[$eq]", keyed(prefix, field)), value.clone());
            }
            Filter::ContainsI { field, value } => {
                params.insert(
                    format!("{}[$containsi]", keyed(prefix, field)),
                    value.clone(),
                );
            }
            Filter::In { field, values } => {
                let key = keyed(prefix, field);
                for (i, value) in values.iter().enumerate() {
                    params.insert(format!("{}[$in][{}]", key, i), value.clone());
                }
            }
            Filter::Between { field, low, high } => {
                let key = keyed(prefix, field);
                params.insert(format!("{}[$gte]", key), low.clone());
                params.insert(format!("{}[$lte]", key), high.clone());
            }
            Filter::And(clauses) => {
                for (i, clause) in clauses.iter().enumerate() {
                    clause.encode(&format!("{}[$and][{}]", prefix, i), params);
                }
            }
            Filter::Or(clauses) => {
                for (i, clause) in clauses.iter().enumerate() {
                    clause.encode(&format!("{}[$or][{}]", prefix, i), params);
                }
            }
        }
    }
}

fn keyed(prefix: &str, field: &FieldPath) -> String {
    let mut key = prefix.to_string();
    for segment in field {
        key.push('[');
        key.push_str(segment);
        key.push(']');
    }
    key
}
