//! Permission round trip against a live service
//!
//! Grants a relation, checks it, expands it, then removes it again:
//! - Structured logging through `tracing-subscriber`
//! - Per-call deadlines with `RequestContext`
//! - Distinguishing permission-denied, cancelled, and exhausted-retry errors
//!
//! Run with: PERMKIT_AUTHZ_TOKEN=... cargo run --example check_permission

use std::time::Duration;

use permkit_authz::permissions::{Error, PermissionDeleteRequest};
use permkit_authz::{
    BearerTokenAuth, ClientOptions, PermissionCheckRequest, PermissionWriteRequest,
    PermissionsClient, RequestContext,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("permkit_authz=debug")),
        )
        .init();

    println!("=== Permission Round Trip ===\n");

    let options = ClientOptions::builder()
        .with_timeout(Duration::from_secs(10))
        .with_max_retries(2)
        .build();
    let token = std::env::var("PERMKIT_AUTHZ_TOKEN")?;
    let client = PermissionsClient::new(BearerTokenAuth::new(token), options)?;

    let grant = PermissionWriteRequest::new("document", "demo-doc", "viewer", "user", "alice");
    let stored = client.write_permission(&grant).await?;
    println!("✓ Wrote tuple {}", stored);

    let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
    let check = PermissionCheckRequest::new("user", "alice", "viewer", "document", "demo-doc");
    match client.check_permission_with_context(&ctx, &check).await {
        Ok(result) => println!("✓ alice can view demo-doc: {}", result.allowed),
        Err(e) => report(&e),
    }

    let viewers = client
        .expand_permissions("document", "demo-doc", "viewer")
        .await?;
    println!("✓ Viewers: {}", viewers.join(", "));

    client
        .delete_permission(&PermissionDeleteRequest::new(
            "document", "demo-doc", "viewer", "user", "alice",
        ))
        .await?;
    println!("✓ Removed tuple");

    Ok(())
}

fn report(e: &Error) {
    if e.is_permission_denied() {
        println!("✗ Token lacks permission to call check");
    } else if e.is_cancelled() {
        println!("✗ Deadline passed before the service answered");
    } else if e.is_retries_exhausted() {
        println!("✗ Service kept failing: {}", e);
    } else {
        println!("✗ Error: {}", e);
    }
}
