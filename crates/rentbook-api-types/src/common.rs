use serde::{Deserialize, Serialize};

/// Update payload: the id addresses the record, the patch becomes the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<P> {
    pub id: String,
    pub patch: P,
}

impl<P> Update<P> {
    pub fn new(id: impl Into<String>, patch: P) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }

    pub fn into_parts(self) -> (String, P) {
        (self.id, self.patch)
    }
}

/// Delete endpoints answer either with the removed record or a bare acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deleted<T> {
    Ack {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Record(T),
}

impl<T> Deleted<T> {
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Ack { success, .. } => *success,
            Self::Record(_) => true,
        }
    }
}
