use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    middleware::from_fn,
    response::{Redirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use session_guard_axum::{
    AxumRequestContext, GuardSession, IntoResponseError, LoginState, Session, ViewRegistry,
    forward_to_view, forward_with_guard_and_model, is_logged_in, require_login_redirect,
};

#[derive(Template, Serialize, Deserialize)]
#[template(path = "index.html.j2")]
struct IndexTemplate {
    #[serde(default)]
    logged_in: bool,
    #[serde(default)]
    user: String,
}

#[derive(Template, Serialize, Deserialize)]
#[template(path = "login.html.j2")]
struct LoginTemplate {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Template, Serialize, Deserialize)]
#[template(path = "home.html.j2")]
struct HomeTemplate {
    #[serde(default)]
    user: String,
    #[serde(default)]
    visits: u64,
}

#[derive(Deserialize, Debug)]
pub(crate) struct LoginForm {
    user: String,
}

fn views() -> ViewRegistry {
    ViewRegistry::new()
        .with_template::<IndexTemplate>("index")
        .with_template::<LoginTemplate>("login")
        .with_template::<HomeTemplate>("home")
}

pub(super) fn router() -> Router<()> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route(
            "/home",
            get(home).route_layer(from_fn(require_login_redirect)),
        )
        .with_state(views())
}

fn user_name(session: &GuardSession) -> String {
    session
        .attribute("user")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) async fn index(State(views): State<ViewRegistry>, mut session: GuardSession) -> Response {
    let model = IndexTemplate {
        logged_in: is_logged_in(&session),
        user: user_name(&session),
    };
    let mut ctx = AxumRequestContext::new(views);
    let result = forward_with_guard_and_model(&mut session, &mut ctx, "index", &model)
        .await
        .into_response_error();
    session.finish(result).await
}

// The login page is reachable even when the activity window has passed
pub(crate) async fn login_form(State(views): State<ViewRegistry>, session: GuardSession) -> Response {
    let mut ctx = AxumRequestContext::new(views);
    let result = forward_to_view(&mut ctx, "login").await.into_response_error();
    session.finish(result).await
}

pub(crate) async fn login(
    State(views): State<ViewRegistry>,
    mut session: GuardSession,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = form.user.trim();
    if user.is_empty() {
        tracing::debug!("Rejected login without a user name");
        let model = LoginTemplate {
            error: Some("Please enter a user name.".to_string()),
        };
        let mut ctx = AxumRequestContext::new(views);
        let result = forward_with_guard_and_model(&mut session, &mut ctx, "login", &model)
            .await
            .into_response_error();
        return session.finish(result).await;
    }

    session.renew().await;
    tracing::info!("User {} logged in with session {}", user, session.id());
    session.set_login_state(LoginState::LoggedIn);
    session.set_attribute("user", Value::String(user.to_string()));
    session.set_attribute("visits", Value::from(0u64));
    session.finish(Redirect::to("/home")).await
}

pub(crate) async fn home(State(views): State<ViewRegistry>, mut session: GuardSession) -> Response {
    let visits = session
        .attribute("visits")
        .and_then(Value::as_u64)
        .unwrap_or_default()
        + 1;
    session.set_attribute("visits", Value::from(visits));

    let model = HomeTemplate {
        user: user_name(&session),
        visits,
    };
    let mut ctx = AxumRequestContext::new(views);
    let result = forward_with_guard_and_model(&mut session, &mut ctx, "home", &model)
        .await
        .into_response_error();
    session.finish(result).await
}
