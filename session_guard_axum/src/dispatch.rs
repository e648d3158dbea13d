use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use axum::response::{Html, IntoResponse, Response};
use http::{StatusCode, header::LOCATION};
use serde::de::DeserializeOwned;
use serde_json::Value;

use session_guard::{GuardError, RequestAttributes, RequestContext};

/// Renders a view from the request attributes
pub type ViewRenderer =
    Arc<dyn Fn(&RequestAttributes) -> Result<String, GuardError> + Send + Sync + 'static>;

/// Named views that requests can be forwarded to
///
/// Cheap to clone, so it can be shared as router state.
#[derive(Clone, Default)]
pub struct ViewRegistry {
    views: Arc<HashMap<String, ViewRenderer>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view rendered by a closure
    pub fn with_view<F>(mut self, name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&RequestAttributes) -> Result<String, GuardError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.views).insert(name.into(), Arc::new(render));
        self
    }

    /// Register an askama template whose fields are read from the `"bean"` attribute
    ///
    /// When no bean is attached the template is built from an empty object,
    /// so every field needs a serde default.
    pub fn with_template<T>(self, name: impl Into<String>) -> Self
    where
        T: Template + DeserializeOwned + 'static,
    {
        self.with_view(name, |attributes: &RequestAttributes| {
            let bean = attributes
                .bean()
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default()));
            let template: T =
                serde_json::from_value(bean).map_err(|e| GuardError::Model(e.to_string()))?;
            template
                .render()
                .map_err(|e| GuardError::Dispatch(e.to_string()))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// Render the named view
    pub fn render(&self, name: &str, attributes: &RequestAttributes) -> Result<String, GuardError> {
        let render = self
            .views
            .get(name)
            .ok_or_else(|| GuardError::ViewNotFound(name.to_string()))?;
        render(attributes)
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// [`RequestContext`] producing axum responses
///
/// Forwarding renders the view in-process, so the client URL is unchanged.
#[derive(Debug)]
pub struct AxumRequestContext {
    views: ViewRegistry,
    attributes: RequestAttributes,
}

impl AxumRequestContext {
    pub fn new(views: ViewRegistry) -> Self {
        Self {
            views,
            attributes: RequestAttributes::new(),
        }
    }

    pub fn attributes(&self) -> &RequestAttributes {
        &self.attributes
    }
}

#[async_trait]
impl RequestContext for AxumRequestContext {
    type Output = Response;

    fn set_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key, value);
    }

    fn redirect(&mut self, location: &str) -> Response {
        tracing::debug!("Redirecting to {}", location);
        redirect_found(location)
    }

    async fn forward(&mut self, view: &str) -> Result<Response, GuardError> {
        let html = self.views.render(view, &self.attributes)?;
        Ok(Html(html).into_response())
    }
}

/// `302 Found` pointing at `location`
pub(crate) fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Template, Deserialize)]
    #[template(source = "Hello {{ name }} ({{ visits }})", ext = "txt")]
    struct GreetingTemplate {
        #[serde(default)]
        name: String,
        #[serde(default)]
        visits: u32,
    }

    fn registry() -> ViewRegistry {
        ViewRegistry::new()
            .with_template::<GreetingTemplate>("greeting")
            .with_view("static", |_: &RequestAttributes| Ok("static page".to_string()))
            .with_view("broken", |_: &RequestAttributes| {
                Err(GuardError::Dispatch("render failed".to_string()))
            })
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_registry_contains() {
        let views = registry();
        assert!(views.contains("greeting"));
        assert!(!views.contains("missing"));
    }

    #[test]
    fn test_template_reads_bean() {
        let mut attributes = RequestAttributes::new();
        attributes.insert("bean", json!({"name": "alice", "visits": 4}));

        let html = registry().render("greeting", &attributes).unwrap();
        assert_eq!(html, "Hello alice (4)");
    }

    #[test]
    fn test_template_without_bean_uses_defaults() {
        let html = registry()
            .render("greeting", &RequestAttributes::new())
            .unwrap();
        assert_eq!(html, "Hello  (0)");
    }

    #[test]
    fn test_template_with_mismatched_bean() {
        let mut attributes = RequestAttributes::new();
        attributes.insert("bean", json!({"visits": "many"}));

        let result = registry().render("greeting", &attributes);
        assert!(matches!(result, Err(GuardError::Model(_))));
    }

    #[tokio::test]
    async fn test_forward_renders_view() {
        let mut ctx = AxumRequestContext::new(registry());
        ctx.set_attribute("bean", json!({"name": "bob"}));

        let response = ctx.forward("greeting").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Hello bob (0)");
    }

    #[tokio::test]
    async fn test_forward_to_unknown_view() {
        let mut ctx = AxumRequestContext::new(registry());

        let result = ctx.forward("missing").await;
        assert_eq!(
            result.err(),
            Some(GuardError::ViewNotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_forward_render_failure() {
        let mut ctx = AxumRequestContext::new(registry());

        let result = ctx.forward("broken").await;
        assert!(matches!(result, Err(GuardError::Dispatch(_))));
    }

    #[test]
    fn test_redirect_is_found() {
        let mut ctx = AxumRequestContext::new(ViewRegistry::new());

        let response = ctx.redirect("/logout");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/logout");
    }
}
