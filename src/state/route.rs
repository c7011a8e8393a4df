use crate::foundation::error::{OrreryError, OrreryResult};
use std::fmt;
use std::str::FromStr;

/// Path-based location of the presentation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Galaxy,
    /// `/about`
    About,
    /// `/projects/{id}`
    Project(String),
}

impl Route {
    /// Parse a path. Trailing slashes are ignored; anything unknown is an error.
    ///
    /// A project path keys on its first segment after `/projects/`, so deeper segments are ignored.
    pub fn parse(path: &str) -> OrreryResult<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::Galaxy);
        }
        if trimmed == "/about" {
            return Ok(Self::About);
        }
        if let Some(rest) = trimmed.strip_prefix("/projects/")
            && let Some(id) = rest.split('/').next()
            && !id.is_empty()
        {
            return Ok(Self::Project(id.to_owned()));
        }
        Err(OrreryError::validation(format!("unknown route '{path}'")))
    }

    /// Path form.
    pub fn path(&self) -> String {
        match self {
            Self::Galaxy => "/".to_owned(),
            Self::About => "/about".to_owned(),
            Self::Project(id) => format!("/projects/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Browser-like history stack.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Route>,
    index: usize,
}

impl History {
    /// History holding only `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Current entry.
    pub fn current(&self) -> &Route {
        &self.entries[self.index]
    }

    /// Push `route`, dropping any forward entries.
    pub fn push(&mut self, route: Route) {
        self.entries.truncate(self.index + 1);
        self.entries.push(route);
        self.index = self.entries.len() - 1;
    }

    /// Replace the current entry.
    pub fn replace(&mut self, route: Route) {
        self.entries[self.index] = route;
    }

    /// Step back; `None` at the oldest entry.
    pub fn back(&mut self) -> Option<&Route> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward; `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&Route> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/route.rs"]
mod tests;
