use serde::Serialize;
use serde_json::Value;

use crate::config::{BEAN_ATTRIBUTE, GuardConfig};
use crate::session::errors::GuardError;
use crate::session::traits::{RequestContext, Session};
use crate::session::types::LoginState;

use super::activity::is_within_activity_window;

/// Activity guard bound to a [`GuardConfig`]
#[derive(Debug, Clone, Default)]
pub struct SessionGuard {
    config: GuardConfig,
}

impl SessionGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Guard configured from the environment
    pub fn from_env() -> Self {
        Self::new(GuardConfig::from_env())
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check the session against the configured window
    pub fn is_within_activity_window<S: Session + ?Sized>(&self, session: &S) -> bool {
        is_within_activity_window(session, self.config.max_inactivity_minutes)
    }

    /// Forward to `view` if the session is inside its activity window
    ///
    /// An expired session is answered with a redirect to the logout URL and
    /// then invalidated; the view is never reached.
    pub async fn forward<S, C>(
        &self,
        session: &mut S,
        ctx: &mut C,
        view: &str,
    ) -> Result<C::Output, GuardError>
    where
        S: Session + ?Sized,
        C: RequestContext + ?Sized,
    {
        self.guard_and_forward(session, ctx, view, None::<&()>).await
    }

    /// Like [`forward`](Self::forward), attaching `model` to the request as `"bean"`
    pub async fn forward_with_model<S, C, M>(
        &self,
        session: &mut S,
        ctx: &mut C,
        view: &str,
        model: &M,
    ) -> Result<C::Output, GuardError>
    where
        S: Session + ?Sized,
        C: RequestContext + ?Sized,
        M: Serialize + ?Sized,
    {
        self.guard_and_forward(session, ctx, view, Some(model))
            .await
    }

    async fn guard_and_forward<S, C, M>(
        &self,
        session: &mut S,
        ctx: &mut C,
        view: &str,
        model: Option<&M>,
    ) -> Result<C::Output, GuardError>
    where
        S: Session + ?Sized,
        C: RequestContext + ?Sized,
        M: Serialize + ?Sized,
    {
        if !self.is_within_activity_window(session) {
            tracing::info!(
                "Session {} exceeded the {} minute activity window, redirecting to {}",
                session.id(),
                self.config.max_inactivity_minutes,
                self.config.logout_url
            );
            let response = ctx.redirect(&self.config.logout_url);
            session.set_login_state(LoginState::LoggedOutTooLong);
            if let Err(e) = session.invalidate().await {
                tracing::debug!("Ignoring failed invalidation of {}: {}", session.id(), e);
            }
            return Ok(response);
        }

        if let Some(model) = model {
            let bean: Value =
                serde_json::to_value(model).map_err(|e| GuardError::Model(e.to_string()))?;
            ctx.set_attribute(BEAN_ATTRIBUTE, bean);
        }
        forward_to_view(ctx, view).await
    }
}

/// Dispatch the request to `view` without any session check
pub async fn forward_to_view<C>(ctx: &mut C, view: &str) -> Result<C::Output, GuardError>
where
    C: RequestContext + ?Sized,
{
    tracing::debug!("Forwarding to view {}", view);
    ctx.forward(view).await.inspect_err(|e| {
        tracing::error!("Failed to forward to view {}: {}", view, e);
    })
}

/// Forward to `view` behind the activity guard configured from the environment
pub async fn forward_with_guard<S, C>(
    session: &mut S,
    ctx: &mut C,
    view: &str,
) -> Result<C::Output, GuardError>
where
    S: Session + ?Sized,
    C: RequestContext + ?Sized,
{
    SessionGuard::from_env().forward(session, ctx, view).await
}

/// Forward to `view` with a model behind the activity guard configured from the environment
pub async fn forward_with_guard_and_model<S, C, M>(
    session: &mut S,
    ctx: &mut C,
    view: &str,
    model: &M,
) -> Result<C::Output, GuardError>
where
    S: Session + ?Sized,
    C: RequestContext + ?Sized,
    M: Serialize + ?Sized,
{
    SessionGuard::from_env()
        .forward_with_model(session, ctx, view, model)
        .await
}
