//! Query cache keys.
//!
//! A key is an ordered list of segments: the resource, the query kind, then
//! either a record id or the filter fields in name order. Absent filter
//! fields contribute no segment, so two filters that leave the same fields
//! unset produce equal keys.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::infra::transport::query::scalar_fields;

/// Filter fields that select a page rather than a result set.
pub const PAGINATION_FIELDS: [&str; 2] = ["page", "pageSize"];

/// Resource family a query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceTag {
    Houses,
    Rooms,
    Tenants,
    Schedulers,
    SchedulerBills,
    Bills,
    Contracts,
}

impl ResourceTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Houses => "houses",
            Self::Rooms => "rooms",
            Self::Tenants => "tenants",
            Self::Schedulers => "schedulers",
            Self::SchedulerBills => "scheduler-bills",
            Self::Bills => "bills",
            Self::Contracts => "contracts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    List,
    Total,
    Detail,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Total => "total",
            Self::Detail => "detail",
        }
    }
}

/// Scalar filter value as it participates in a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&Value> for KeyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => number
                .as_i64()
                .map_or_else(|| Self::Str(number.to_string()), Self::Int),
            Value::String(text) => Self::Str(text.clone()),
            other => Self::Str(other.to_string()),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Int(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySegment {
    Resource(ResourceTag),
    Kind(QueryKind),
    Id(String),
    Field { name: String, value: KeyValue },
}

/// Composite identifier of one cached query result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    segments: Vec<KeySegment>,
}

impl QueryKey {
    /// Key of a list query; every present filter field is part of the key.
    pub fn list<F: Serialize>(tag: ResourceTag, filter: &F) -> Self {
        Self::with_fields(tag, QueryKind::List, filter, &[])
    }

    /// Key of a count query; pagination fields are dropped because the
    /// count does not depend on which page is shown.
    pub fn total<F: Serialize>(tag: ResourceTag, filter: &F) -> Self {
        Self::with_fields(tag, QueryKind::Total, filter, &PAGINATION_FIELDS)
    }

    pub fn detail(tag: ResourceTag, id: &str) -> Self {
        Self {
            segments: vec![
                KeySegment::Resource(tag),
                KeySegment::Kind(QueryKind::Detail),
                KeySegment::Id(id.to_string()),
            ],
        }
    }

    fn with_fields<F: Serialize>(
        tag: ResourceTag,
        kind: QueryKind,
        filter: &F,
        skip: &[&str],
    ) -> Self {
        let mut segments = vec![KeySegment::Resource(tag), KeySegment::Kind(kind)];
        segments.extend(
            scalar_fields(filter)
                .into_iter()
                .filter(|(name, _)| !skip.contains(&name.as_str()))
                .map(|(name, value)| KeySegment::Field {
                    value: KeyValue::from(&value),
                    name,
                }),
        );
        Self { segments }
    }

    pub fn resource(&self) -> Option<ResourceTag> {
        match self.segments.first() {
            Some(KeySegment::Resource(tag)) => Some(*tag),
            _ => None,
        }
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    /// True when the key's leading segments equal the prefix.
    pub fn matches(&self, prefix: &KeyPrefix) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_segments(f, &self.segments)
    }
}

fn write_segments(f: &mut fmt::Formatter<'_>, segments: &[KeySegment]) -> fmt::Result {
    let mut fields = 0_usize;
    for segment in segments {
        match segment {
            KeySegment::Resource(tag) => f.write_str(tag.as_str())?,
            KeySegment::Kind(kind) => write!(f, "/{}", kind.as_str())?,
            KeySegment::Id(id) => write!(f, "/{id}")?,
            KeySegment::Field { name, value } => {
                let sep = if fields == 0 { '?' } else { '&' };
                write!(f, "{sep}{name}={value}")?;
                fields += 1;
            }
        }
    }
    Ok(())
}

/// Leading segments used to invalidate a family of keys at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPrefix {
    segments: Vec<KeySegment>,
}

impl KeyPrefix {
    /// Matches every key in the cache.
    pub fn all() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Matches every query of one resource.
    pub fn resource(tag: ResourceTag) -> Self {
        Self {
            segments: vec![KeySegment::Resource(tag)],
        }
    }

    /// Matches every query of one kind for a resource.
    pub fn kind(tag: ResourceTag, kind: QueryKind) -> Self {
        Self {
            segments: vec![KeySegment::Resource(tag), KeySegment::Kind(kind)],
        }
    }

    /// Matches the detail query of one record.
    pub fn record(tag: ResourceTag, id: &str) -> Self {
        Self {
            segments: QueryKey::detail(tag, id).segments,
        }
    }

    /// Narrows the prefix with one more leading field segment.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<KeyValue>) -> Self {
        self.segments.push(KeySegment::Field {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    /// Prefixes that refresh every list view of a resource (lists and counts).
    pub fn list_views(tag: ResourceTag) -> [Self; 2] {
        [Self::kind(tag, QueryKind::List), Self::kind(tag, QueryKind::Total)]
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("*");
        }
        write_segments(f, &self.segments)
    }
}
