//! Collection query builder
//!
//! Assembles pagination, sorting, field selection, relation population
//! and filters into the content API's query-string format. Parameter
//! order is deterministic so equal queries produce identical URLs.

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::filter::Filter;

/// Characters escaped in query keys and values. Brackets stay readable
/// since the API uses them structurally.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?')
    .add(b'`');

/// A collection query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    page: Option<usize>,
    page_size: Option<usize>,
    sort: Vec<String>,
    fields: Vec<String>,
    populate: Vec<Populate>,
    filter: Filter,
}

/// A relation to populate, optionally restricted to named fields
#[derive(Debug, Clone, PartialEq)]
struct Populate {
    relation: String,
    fields: Vec<String>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a page of results (1-based)
    pub fn paginate(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Add a sort key like `publishedAt:desc`
    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.sort.push(key.into());
        self
    }

    /// Restrict returned attributes to the named field
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Populate a relation in full
    pub fn populate(mut self, relation: impl Into<String>) -> Self {
        self.populate.push(Populate {
            relation: relation.into(),
            fields: Vec::new(),
        });
        self
    }

    /// Populate a relation, selecting only the named fields
    pub fn populate_fields(mut self, relation: impl Into<String>, fields: &[&str]) -> Self {
        self.populate.push(Populate {
            relation: relation.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    /// Apply a filter expression
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether this query carries an active filter
    pub fn has_filter(&self) -> bool {
        self.filter.is_active()
    }

    /// Flatten into ordered `key=value` parameters
    pub fn to_params(&self) -> IndexMap<String, String> {
        let mut params = IndexMap::new();

        for (i, name) in self.fields.iter().enumerate() {
            params.insert(format!("fields[{}]", i), name.clone());
        }

        for populate in &self.populate {
            if populate.fields.is_empty() {
                params.insert(
                    format!("populate[{}]", populate.relation),
                    "true".to_string(),
                );
            } else {
                for (i, field) in populate.fields.iter().enumerate() {
                    params.insert(
                        format!("populate[{}][fields][{}]", populate.relation, i),
                        field.clone(),
                    );
                }
            }
        }

        params.extend(self.filter.to_params());

        for (i, key) in self.sort.iter().enumerate() {
            params.insert(format!("sort[{}]", i), key.clone());
        }

        if let Some(page) = self.page {
            params.insert("pagination[page]".to_string(), page.to_string());
        }
        if let Some(page_size) = self.page_size {
            params.insert("pagination[pageSize]".to_string(), page_size.to_string());
        }

        params
    }

    /// Render the percent-encoded query string (no leading `?`)
    pub fn to_query_string(&self) -> String {
        self.to_params()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_ESCAPE),
                    utf8_percent_encode(value, QUERY_ESCAPE)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_empty_string() {
        assert_eq!(Query::new().to_query_string(), "");
    }

    #[test]
    fn test_pagination_and_sort() {
        let qs = Query::new()
            .sort("publishedAt:desc")
            .paginate(2, 6)
            .to_query_string();
        assert!(qs.contains("sort[0]=publishedAt:desc"));
        assert!(qs.contains("pagination[page]=2"));
        assert!(qs.contains("pagination[pageSize]=6"));
    }

    #[test]
    fn test_fields_and_populate() {
        let params = Query::new()
            .field("handle")
            .field("updatedAt")
            .populate("featuredImage_landscape")
            .populate_fields("categories", &["name"])
            .to_params();
        assert_eq!(params["fields[0]"], "handle");
        assert_eq!(params["fields[1]"], "updatedAt");
        assert_eq!(params["populate[featuredImage_landscape]"], "true");
        assert_eq!(params["populate[categories][fields][0]"], "name");
    }

    #[test]
    fn test_filter_params_are_included() {
        let query = Query::new().filter(Filter::eq(&["handle"], "hello-world"));
        assert!(query.has_filter());
        assert_eq!(
            query.to_query_string(),
            "filters[handle][$eq]=hello-world"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let qs = Query::new()
            .filter(Filter::contains_i(&["title"], "cats & dogs"))
            .to_query_string();
        assert!(qs.contains("cats%20%26%20dogs"));
    }

    #[test]
    fn test_deterministic_order() {
        let build = || {
            Query::new()
                .field("handle")
                .populate("categories")
                .sort("publishedAt:desc")
                .paginate(1, 6)
                .to_query_string()
        };
        assert_eq!(build(), build());
    }
}
