use axum::{extract::Query, response::Response};
use serde::Deserialize;

use session_guard::Session;

use crate::config::GUARD_REDIRECT_ANON;
use crate::dispatch::redirect_found;
use crate::session::GuardSession;

#[derive(Deserialize)]
pub(crate) struct RedirectQuery {
    redirect: Option<String>,
}

/// Only same-site paths are accepted as redirect targets
fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

/// Handles logout requests with optional redirection
///
/// The session is invalidated and its cookie expired. The client is sent to
/// the `redirect` query parameter when it is a local path, otherwise to
/// `GUARD_REDIRECT_ANON`.
pub(crate) async fn logout(
    mut session: GuardSession,
    Query(params): Query<RedirectQuery>,
) -> Response {
    if let Err(e) = session.invalidate().await {
        tracing::debug!("Ignoring failed invalidation on logout: {}", e);
    }

    let target = match params.redirect {
        Some(redirect_to) if is_local_path(&redirect_to) => redirect_to,
        Some(redirect_to) => {
            tracing::warn!("Refusing to redirect to {}", redirect_to);
            GUARD_REDIRECT_ANON.clone()
        }
        None => GUARD_REDIRECT_ANON.clone(),
    };

    session.finish(redirect_found(&target)).await
}
