use mercato_auth::JwtVerifier;
use mercato_store::MemoryStore;

/// Shared application state passed to every handler via axum `State`.
///
/// Both collaborators are cheap cloneable handles constructed once at
/// startup: the store client (the embedded backend here; a managed-store
/// adapter slots in through the same trait) and the identity verifier.
#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    pub verifier: JwtVerifier,
}
