//! Permissions API client.
//!
//! This client wraps `AuthzClient` from `authz-client` and provides typed
//! methods for the relation-tuple operations.

use permkit_authz_client::{
    Authenticator, AuthzClient, ClientOptions, ReqwestTransport, RequestContext, Transport,
};
use tracing::instrument;

use crate::error::Result;
use crate::types::{
    ListObjectsRequest, Permission, PermissionCheckRequest, PermissionCheckResponse,
    PermissionDeleteRequest, PermissionExpandRequest, PermissionReadRequest,
    PermissionWriteRequest,
};

const CHECK_PATH: &str = "/api/permissions/check";
const WRITE_PATH: &str = "/api/permissions/write";
const DELETE_PATH: &str = "/api/permissions/delete";

/// Permissions API client.
///
/// Every operation validates its input before sending anything. Each has a
/// `*_with_context` variant taking an explicit [`RequestContext`] for
/// cancellation, deadlines, and per-call tokens.
///
/// # Example
///
/// ```rust,ignore
/// use permkit_authz_permissions::{PermissionsClient, PermissionCheckRequest};
/// use permkit_authz_auth::BearerTokenAuth;
///
/// let client = PermissionsClient::new(BearerTokenAuth::new("token"), ClientOptions::default())?;
///
/// let result = client
///     .check_permission(&PermissionCheckRequest::new("user", "alice", "viewer", "document", "doc1"))
///     .await?;
/// if result.allowed {
///     // ...
/// }
///
/// let viewers = client.expand_permissions("document", "doc1", "viewer").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PermissionsClient<T = ReqwestTransport> {
    client: AuthzClient<T>,
}

impl PermissionsClient<ReqwestTransport> {
    /// Create a client with the given authenticator and options.
    pub fn new(auth: impl Authenticator + 'static, options: ClientOptions) -> Result<Self> {
        let client = AuthzClient::new(auth, options)?;
        Ok(Self { client })
    }
}

impl<T: Transport> PermissionsClient<T> {
    /// Create a permissions client from an existing `AuthzClient`.
    pub fn from_client(client: AuthzClient<T>) -> Self {
        Self { client }
    }

    /// Get the underlying `AuthzClient`.
    pub fn inner(&self) -> &AuthzClient<T> {
        &self.client
    }

    /// Replace the active authenticator.
    ///
    /// Calls already in flight keep the authenticator they started with.
    pub fn set_auth(&mut self, auth: impl Authenticator + 'static) {
        self.client.set_auth(auth);
    }

    // =========================================================================
    // Check
    // =========================================================================

    /// Check whether a subject holds a relation on an object.
    pub async fn check_permission(
        &self,
        request: &PermissionCheckRequest,
    ) -> Result<PermissionCheckResponse> {
        self.check_permission_with_context(&RequestContext::new(), request)
            .await
    }

    #[instrument(skip(self, ctx), fields(object = %request.object_id, relation = %request.relation))]
    pub async fn check_permission_with_context(
        &self,
        ctx: &RequestContext,
        request: &PermissionCheckRequest,
    ) -> Result<PermissionCheckResponse> {
        request.validate()?;
        self.client
            .post_json(ctx, CHECK_PATH, request)
            .await
            .map_err(Into::into)
    }

    // =========================================================================
    // Write / Delete
    // =========================================================================

    /// Create a relation tuple and return it as stored.
    pub async fn write_permission(&self, request: &PermissionWriteRequest) -> Result<Permission> {
        self.write_permission_with_context(&RequestContext::new(), request)
            .await
    }

    #[instrument(skip(self, ctx), fields(object = %request.object_id, relation = %request.relation))]
    pub async fn write_permission_with_context(
        &self,
        ctx: &RequestContext,
        request: &PermissionWriteRequest,
    ) -> Result<Permission> {
        request.validate()?;
        self.client
            .post_json(ctx, WRITE_PATH, request)
            .await
            .map_err(Into::into)
    }

    /// Remove a relation tuple.
    pub async fn delete_permission(&self, request: &PermissionDeleteRequest) -> Result<()> {
        self.delete_permission_with_context(&RequestContext::new(), request)
            .await
    }

    #[instrument(skip(self, ctx), fields(object = %request.object_id, relation = %request.relation))]
    pub async fn delete_permission_with_context(
        &self,
        ctx: &RequestContext,
        request: &PermissionDeleteRequest,
    ) -> Result<()> {
        request.validate()?;
        self.client
            .delete_json(ctx, DELETE_PATH, request)
            .await
            .map_err(Into::into)
    }

    // =========================================================================
    // Read / Expand / List
    // =========================================================================

    /// All tuples stored on an object.
    pub async fn read_permissions(
        &self,
        namespace: &str,
        object_id: &str,
    ) -> Result<Vec<Permission>> {
        self.read_permissions_with_context(
            &RequestContext::new(),
            &PermissionReadRequest::new(namespace, object_id),
        )
        .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn read_permissions_with_context(
        &self,
        ctx: &RequestContext,
        request: &PermissionReadRequest,
    ) -> Result<Vec<Permission>> {
        request.validate()?;
        self.client
            .get_json(ctx, &request.path())
            .await
            .map_err(Into::into)
    }

    /// Every subject holding `relation` on the object, as `type:id` or
    /// `type:id#relation`.
    pub async fn expand_permissions(
        &self,
        namespace: &str,
        object_id: &str,
        relation: &str,
    ) -> Result<Vec<String>> {
        self.expand_permissions_with_context(
            &RequestContext::new(),
            &PermissionExpandRequest::new(namespace, object_id, relation),
        )
        .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn expand_permissions_with_context(
        &self,
        ctx: &RequestContext,
        request: &PermissionExpandRequest,
    ) -> Result<Vec<String>> {
        request.validate()?;
        self.client
            .get_json(ctx, &request.path())
            .await
            .map_err(Into::into)
    }

    /// Ids of the objects in `namespace` on which the subject holds `relation`.
    pub async fn list_objects(
        &self,
        subject_type: &str,
        subject_id: &str,
        relation: &str,
        namespace: &str,
    ) -> Result<Vec<String>> {
        self.list_objects_with_context(
            &RequestContext::new(),
            &ListObjectsRequest::new(subject_type, subject_id, relation, namespace),
        )
        .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_objects_with_context(
        &self,
        ctx: &RequestContext,
        request: &ListObjectsRequest,
    ) -> Result<Vec<String>> {
        request.validate()?;
        self.client
            .get_json(ctx, &request.path())
            .await
            .map_err(Into::into)
    }
}
