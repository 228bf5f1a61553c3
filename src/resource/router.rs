//! In-process resource with handlers registered per verb and identifier

use core::fmt;
use std::collections::HashMap;

use tracing::debug;

use super::{ActionFailure, ActionOutcome, Params, Resource, Verb};

type Handler = Box<dyn Fn(&Params) -> Result<ActionOutcome, ActionFailure> + Send + Sync>;

/// Resource backed by closures
///
/// # Example
/// ```
/// use resource_cli::resource::{ActionOutcome, Params, Resource, Router, Verb};
///
/// let router = Router::new().get("app://self/ping", |_params| {
///     Ok(ActionOutcome::from_fields(200, [("reply", "pong")]))
/// });
///
/// let outcome = router.request(Verb::Get, "app://self/ping", &Params::new()).unwrap();
/// assert_eq!(outcome.field("reply").unwrap(), "pong");
/// ```
#[derive(Default)]
pub struct Router {
    routes: HashMap<(Verb, String), Handler>,
}

impl Router {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler (builder pattern); a later registration replaces an earlier one
    #[must_use]
    pub fn route<U, F>(mut self, verb: Verb, uri: U, handler: F) -> Self
    where
        U: Into<String>,
        F: Fn(&Params) -> Result<ActionOutcome, ActionFailure> + Send + Sync + 'static,
    {
        self.routes.insert((verb, uri.into()), Box::new(handler));
        self
    }

    /// Register a `get` handler
    #[must_use]
    #[inline]
    pub fn get<U, F>(self, uri: U, handler: F) -> Self
    where
        U: Into<String>,
        F: Fn(&Params) -> Result<ActionOutcome, ActionFailure> + Send + Sync + 'static,
    {
        self.route(Verb::Get, uri, handler)
    }

    /// Register a `post` handler
    #[must_use]
    #[inline]
    pub fn post<U, F>(self, uri: U, handler: F) -> Self
    where
        U: Into<String>,
        F: Fn(&Params) -> Result<ActionOutcome, ActionFailure> + Send + Sync + 'static,
    {
        self.route(Verb::Post, uri, handler)
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, verb: Verb, uri: &str) -> bool {
        self.routes.contains_key(&(verb, uri.to_owned()))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Resource for Router {
    fn request(&self, verb: Verb, uri: &str, params: &Params) -> Result<ActionOutcome, ActionFailure> {
        let handler = self
            .routes
            .get(&(verb, uri.to_owned()))
            .ok_or_else(|| ActionFailure::not_found(verb, uri))?;

        debug!("Routing {} {}", verb, uri);
        handler(params)
    }
}
