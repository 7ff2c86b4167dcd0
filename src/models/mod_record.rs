use serde::{Deserialize, Serialize};

/// One installable mod as returned by the BeatMods catalog.
///
/// Dependencies are embedded as complete records, so resolving a selection
/// never needs a second catalog lookup. Records are treated as immutable
/// values; the resolver works on references into the fetched catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default)]
    pub dependencies: Vec<ModRecord>,

    #[serde(default)]
    pub downloads: Vec<Download>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub username: String,
}

/// A downloadable archive variant of a mod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    #[serde(rename = "type", default)]
    pub kind: String,

    pub url: String,
}

impl ModRecord {
    /// Create a record with no metadata, downloads or dependencies.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            version: String::new(),
            author: None,
            dependencies: Vec::new(),
            downloads: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<ModRecord>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_download(mut self, url: impl Into<String>) -> Self {
        self.downloads.push(Download {
            kind: "universal".to_string(),
            url: url.into(),
        });
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The download the installer uses (always the first listed).
    pub fn primary_download(&self) -> Option<&Download> {
        self.downloads.first()
    }

    /// Name with version and author when the catalog provides them,
    /// e.g. `SongCore 3.9.5 by Kyle1413`.
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if !self.version.is_empty() {
            label.push(' ');
            label.push_str(&self.version);
        }
        if let Some(author) = self.author.as_ref().filter(|a| !a.username.is_empty()) {
            label.push_str(" by ");
            label.push_str(&author.username);
        }
        label
    }

    /// Title shown in the selection prompt.
    pub fn display_title(&self, include_description: bool) -> String {
        if include_description && !self.description.is_empty() {
            format!("{} - {}", self.name, self.description)
        } else {
            self.name.clone()
        }
    }
}
