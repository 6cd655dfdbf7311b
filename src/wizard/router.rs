//! In-memory routing between the wizard's addressable views

use crate::form::Step;

/// Logical views of the wizard.
///
/// `Confirmation` and `Result` together make up the terminal submitted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Step(Step),
    Confirmation,
    Result,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Step(Step::One) => "/step/1",
            Route::Step(Step::Two) => "/step/2",
            Route::Step(Step::Three) => "/step/3",
            Route::Confirmation => "/confirmation",
            Route::Result => "/result",
        }
    }

    /// Resolve a path; `None` means not found. The root path is handled by [`Router::open`].
    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "/confirmation" => Some(Route::Confirmation),
            "/result" => Some(Route::Result),
            other => {
                let number = other.strip_prefix("/step/")?.parse().ok()?;
                Step::from_number(number).map(Route::Step)
            }
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            Route::Step(step) => Some(*step),
            _ => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Route::Confirmation | Route::Result)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Tracks the current route
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Route::Step(Step::One),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Move to `route`; returns true if the route changed
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        self.current = route;
        true
    }

    /// Swap the current route, e.g. for a redirect
    pub fn replace(&mut self, route: Route) {
        self.current = route;
    }

    /// Open a path as the session's entry point.
    ///
    /// The root redirects to step 1 with replace semantics.
    pub fn open(&mut self, path: &str) -> Option<Route> {
        let route = if path.trim_end_matches('/').is_empty() {
            Route::Step(Step::One)
        } else {
            Route::from_path(path)?
        };
        self.replace(route);
        Some(route)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
