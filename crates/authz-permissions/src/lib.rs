//! # permkit-authz-permissions
//!
//! Relation-tuple operations for the permkit authorization API.
//!
//! A tuple reads `object#relation@subject`, e.g. `document:doc1#viewer@user:alice`.
//! Subjects may themselves be qualified by a relation, which grants through
//! group membership: `document:doc1#viewer@group:team-alpha#member`.
//!
//! ## Operations
//!
//! | Method | HTTP |
//! |---|---|
//! | [`check_permission`](PermissionsClient::check_permission) | `POST /api/permissions/check` |
//! | [`write_permission`](PermissionsClient::write_permission) | `POST /api/permissions/write` |
//! | [`delete_permission`](PermissionsClient::delete_permission) | `DELETE /api/permissions/delete` |
//! | [`read_permissions`](PermissionsClient::read_permissions) | `GET /api/permissions/read/{namespace}/{objectId}` |
//! | [`expand_permissions`](PermissionsClient::expand_permissions) | `GET /api/permissions/expand/{namespace}/{objectId}/{relation}` |
//! | [`list_objects`](PermissionsClient::list_objects) | `GET /api/permissions/list/{subjectType}/{subjectId}/{relation}/{namespace}` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use permkit_authz_permissions::{PermissionsClient, PermissionWriteRequest};
//! use permkit_authz_auth::BearerTokenAuth;
//! use permkit_authz_client::ClientOptions;
//!
//! let client = PermissionsClient::new(BearerTokenAuth::new("token"), ClientOptions::default())?;
//!
//! let grant = PermissionWriteRequest::new("document", "doc1", "viewer", "group", "team-alpha")
//!     .with_subject_relation("member");
//! let stored = client.write_permission(&grant).await?;
//! println!("{stored}");
//! ```

mod client;
mod error;
mod types;

pub use client::PermissionsClient;
pub use error::{Error, ErrorKind, Result};
pub use types::{
    ListObjectsRequest, Permission, PermissionCheckRequest, PermissionCheckResponse,
    PermissionDeleteRequest, PermissionExpandRequest, PermissionReadRequest,
    PermissionWriteRequest,
};
