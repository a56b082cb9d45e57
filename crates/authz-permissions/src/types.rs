//! Permission tuples and the request/response bodies of the permissions API.
//!
//! Field names follow the service's camelCase JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn require(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(format!("{field} is required")));
    }
    Ok(())
}

fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

// ============================================================================
// Check
// ============================================================================

/// Does `subject` hold `relation` on `object`?
///
/// ```rust,ignore
/// let req = PermissionCheckRequest::new("user", "alice", "viewer", "document", "doc1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheckRequest {
    /// Subject type (e.g. "user", "group").
    pub subject_type: String,
    pub subject_id: String,
    /// Relation to check (e.g. "viewer", "editor", "owner").
    pub relation: String,
    /// Object namespace (e.g. "document", "folder").
    pub object_namespace: String,
    pub object_id: String,
}

impl PermissionCheckRequest {
    pub fn new(
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
        relation: impl Into<String>,
        object_namespace: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
            relation: relation.into(),
            object_namespace: object_namespace.into(),
            object_id: object_id.into(),
        }
    }

    /// Check that every field is present.
    pub fn validate(&self) -> Result<()> {
        require(&self.subject_type, "subjectType")?;
        require(&self.subject_id, "subjectId")?;
        require(&self.relation, "relation")?;
        require(&self.object_namespace, "objectNamespace")?;
        require(&self.object_id, "objectId")
    }
}

/// Result of a permission check.
///
/// Missing fields decode to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionCheckResponse {
    pub allowed: bool,
    pub message: String,
}

// ============================================================================
// Write / Delete
// ============================================================================

/// Create a relation tuple.
///
/// Set `subject_relation` for indirect grants, e.g. every `member` of
/// `group:team-alpha` becomes a `viewer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionWriteRequest {
    pub object_namespace: String,
    pub object_id: String,
    pub relation: String,
    pub subject_type: String,
    pub subject_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_relation: Option<String>,
}

impl PermissionWriteRequest {
    pub fn new(
        object_namespace: impl Into<String>,
        object_id: impl Into<String>,
        relation: impl Into<String>,
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            object_namespace: object_namespace.into(),
            object_id: object_id.into(),
            relation: relation.into(),
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
            subject_relation: None,
        }
    }

    /// Grant through a relation of the subject instead of the subject itself.
    pub fn with_subject_relation(mut self, relation: impl Into<String>) -> Self {
        self.subject_relation = Some(relation.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.object_namespace, "objectNamespace")?;
        require(&self.object_id, "objectId")?;
        require(&self.relation, "relation")?;
        require(&self.subject_type, "subjectType")?;
        require(&self.subject_id, "subjectId")
    }
}

/// Remove a relation tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDeleteRequest {
    pub object_namespace: String,
    pub object_id: String,
    pub relation: String,
    pub subject_type: String,
    pub subject_id: String,
}

impl PermissionDeleteRequest {
    pub fn new(
        object_namespace: impl Into<String>,
        object_id: impl Into<String>,
        relation: impl Into<String>,
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            object_namespace: object_namespace.into(),
            object_id: object_id.into(),
            relation: relation.into(),
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.object_namespace, "objectNamespace")?;
        require(&self.object_id, "objectId")?;
        require(&self.relation, "relation")?;
        require(&self.subject_type, "subjectType")?;
        require(&self.subject_id, "subjectId")
    }
}

// ============================================================================
// Read / Expand / List
// ============================================================================

/// All tuples on one object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionReadRequest {
    pub object_namespace: String,
    pub object_id: String,
}

impl PermissionReadRequest {
    pub fn new(object_namespace: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object_namespace: object_namespace.into(),
            object_id: object_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.object_namespace, "objectNamespace")?;
        require(&self.object_id, "objectId")
    }

    pub(crate) fn path(&self) -> String {
        format!(
            "/api/permissions/read/{}/{}",
            segment(&self.object_namespace),
            segment(&self.object_id)
        )
    }
}

/// Every subject holding a relation on an object, directly or indirectly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionExpandRequest {
    pub object_namespace: String,
    pub object_id: String,
    pub relation: String,
}

impl PermissionExpandRequest {
    pub fn new(
        object_namespace: impl Into<String>,
        object_id: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            object_namespace: object_namespace.into(),
            object_id: object_id.into(),
            relation: relation.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.object_namespace, "objectNamespace")?;
        require(&self.object_id, "objectId")?;
        require(&self.relation, "relation")
    }

    pub(crate) fn path(&self) -> String {
        format!(
            "/api/permissions/expand/{}/{}/{}",
            segment(&self.object_namespace),
            segment(&self.object_id),
            segment(&self.relation)
        )
    }
}

/// Every object in a namespace on which a subject holds a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsRequest {
    pub object_namespace: String,
    pub relation: String,
    pub subject_type: String,
    pub subject_id: String,
}

impl ListObjectsRequest {
    pub fn new(
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
        relation: impl Into<String>,
        object_namespace: impl Into<String>,
    ) -> Self {
        Self {
            object_namespace: object_namespace.into(),
            relation: relation.into(),
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.subject_type, "subjectType")?;
        require(&self.subject_id, "subjectId")?;
        require(&self.relation, "relation")?;
        require(&self.object_namespace, "objectNamespace")
    }

    pub(crate) fn path(&self) -> String {
        format!(
            "/api/permissions/list/{}/{}/{}/{}",
            segment(&self.subject_type),
            segment(&self.subject_id),
            segment(&self.relation),
            segment(&self.object_namespace)
        )
    }
}

// ============================================================================
// Permission tuple
// ============================================================================

/// A stored relation tuple, `object#relation@subject`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Permission {
    pub id: i64,
    pub object_namespace: String,
    pub object_id: String,
    pub relation: String,
    pub subject_type: String,
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Permission {
    /// Creation time parsed as RFC 3339.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Returns true if the tuple grants through a subject relation.
    pub fn is_indirect(&self) -> bool {
        self.subject_relation.is_some()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}#{}@{}:{}",
            self.object_namespace, self.object_id, self.relation, self.subject_type, self.subject_id
        )?;
        if let Some(ref subject_relation) = self.subject_relation {
            write!(f, "#{}", subject_relation)?;
        }
        Ok(())
    }
}
