//! Tags and describe filters

use serde::{Deserialize, Serialize};

/// Key/value tag attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Tag as returned by DescribeTags, with the resource it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescription {
    pub resource_id: String,
    pub resource_type: Option<String>,
    pub key: String,
    pub value: String,
}

impl TagDescription {
    pub fn tag(&self) -> Tag {
        Tag::new(&self.key, &self.value)
    }
}

/// Filter for describe calls (e.g. `instance-state-name`, `tag:Name`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter on a tag value: `tag:<key>` = `value`
    pub fn tag(key: &str, value: impl Into<String>) -> Self {
        Self::new(format!("tag:{}", key), [value.into()])
    }
}

/// Find a tag value by key
pub(crate) fn find_tag<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
    tags.iter()
        .find(|t| t.key == key)
        .map(|t| t.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter() {
        let filter = Filter::tag("Name", "web");
        assert_eq!(filter.name, "tag:Name");
        assert_eq!(filter.values, vec!["web".to_string()]);
    }

    #[test]
    fn test_find_tag() {
        let tags = vec![Tag::new("env", "prod"), Tag::new("Name", "api")];
        assert_eq!(find_tag(&tags, "Name"), Some("api"));
        assert_eq!(find_tag(&tags, "missing"), None);
    }
}
