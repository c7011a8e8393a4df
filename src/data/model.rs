use crate::foundation::error::{OrreryError, OrreryResult};
use serde::{Deserialize, Serialize};

/// Normalized position of a project inside the galaxy, both axes in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxyPosition {
    /// Horizontal position, 0.5 is the galaxy center.
    pub x: f64,
    /// Vertical position, 0.5 is the galaxy center.
    pub y: f64,
}

/// Sun of a project's solar system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunRecord {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// CSS color string; a pale yellow is used when absent.
    #[serde(default)]
    pub color: Option<String>,
    /// Inspector title.
    #[serde(default)]
    pub title: Option<String>,
    /// Inspector subtitle.
    #[serde(default)]
    pub subtext: Option<String>,
    /// Short info line.
    #[serde(default)]
    pub info: Option<String>,
    /// Inspector body text.
    #[serde(default)]
    pub body: Option<String>,
}

/// One orbiting planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetRecord {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// CSS color string.
    #[serde(default = "default_planet_color")]
    pub color: String,
    /// Orbit radius in pixels.
    pub orbit_radius: f64,
    /// Planet radius in pixels.
    pub size: f64,
    /// Inspector title.
    #[serde(default)]
    pub title: Option<String>,
    /// Inspector subtitle.
    #[serde(default)]
    pub subtext: Option<String>,
    /// Short info line.
    #[serde(default)]
    pub info: Option<String>,
    /// Inspector body text.
    #[serde(default)]
    pub body: Option<String>,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}

fn default_planet_color() -> String {
    "white".to_owned()
}

/// One project, rendered as a star system in the galaxy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Stable id used in `/projects/{id}` routes. Falls back to the catalog key.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// CSS color string of the star.
    #[serde(default = "default_planet_color")]
    pub color: String,
    /// Where the star sits in the galaxy.
    pub galaxy_position: GalaxyPosition,
    /// Planets in orbit order.
    #[serde(default)]
    pub planets: Vec<PlanetRecord>,
    /// Central sun.
    #[serde(default)]
    pub sun: SunRecord,
    /// Free-form discovery date shown as "Discovered {date}".
    #[serde(default)]
    pub date: Option<String>,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}

impl ProjectRecord {
    /// "Discovered {date}" or an empty string when the project has no date.
    pub fn discovered_label(&self) -> String {
        match self.date.as_deref() {
            Some(d) if !d.is_empty() => format!("Discovered {d}"),
            _ => String::new(),
        }
    }
}

/// Title/body pair shown by the galaxy help panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HelpRecord {
    /// Panel title.
    #[serde(default = "default_help_title")]
    pub title: String,
    /// Panel body.
    #[serde(default)]
    pub body: String,
}

fn default_help_title() -> String {
    "Help".to_owned()
}

/// About page content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AboutRecord {
    /// Panel title.
    pub title: String,
    /// Panel body.
    pub info: String,
    /// Optional profile image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Optional galaxy help content.
    #[serde(default)]
    pub help: Option<HelpRecord>,
}

impl Default for AboutRecord {
    fn default() -> Self {
        Self {
            title: "About".to_owned(),
            info: "Content loading failed.".to_owned(),
            image: None,
            help: None,
        }
    }
}

/// Ordered project collection keyed by id.
///
/// Iteration order is the order of the source JSON object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectCatalog {
    projects: Vec<ProjectRecord>,
}

impl ProjectCatalog {
    /// Build a catalog from records, dropping later duplicates of an id.
    pub fn from_records(records: impl IntoIterator<Item = ProjectRecord>) -> Self {
        let mut projects: Vec<ProjectRecord> = Vec::new();
        for r in records {
            if projects.iter().any(|p| p.id == r.id) {
                tracing::warn!(id = %r.id, "duplicate project id, keeping the first");
                continue;
            }
            projects.push(r);
        }
        Self { projects }
    }

    /// Parse a `{ key: project, ... }` JSON object.
    ///
    /// Entries that fail to deserialize are skipped with a warning. A document that is not an
    /// object at all is an error.
    pub fn from_json_str(s: &str) -> OrreryResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        let serde_json::Value::Object(map) = value else {
            return Err(OrreryError::data("project catalog must be a JSON object"));
        };

        let mut records = Vec::with_capacity(map.len());
        for (key, entry) in map {
            match serde_json::from_value::<ProjectRecord>(entry) {
                Ok(mut rec) => {
                    if rec.id.is_empty() {
                        rec.id = key;
                    }
                    records.push(rec);
                }
                Err(e) => tracing::warn!(key = %key, error = %e, "skipping malformed project"),
            }
        }
        Ok(Self::from_records(records))
    }

    /// Look up a project by id.
    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRecord> {
        self.projects.iter()
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// `true` when the catalog holds no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProjectCatalog {
    type Item = &'a ProjectRecord;
    type IntoIter = std::slice::Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/model.rs"]
mod tests;
