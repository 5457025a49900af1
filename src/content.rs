//! Page content records.
//!
//! All copy is static data read from a TOML file. The built-in file is
//! embedded at compile time; `--content` points at a replacement. Records are
//! read-only once loaded and render in file order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FolioError, Result};

const EMBEDDED: &str = include_str!("../content/portfolio.toml");

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nav {
    pub brand: String,
    pub links: Vec<Link>,
    pub cta: Link,
}

/// A run of intro copy; emphasized runs render bright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub emphasis: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    /// Typewriter text; `\n` separates terminal lines.
    pub terminal: String,
    pub badge: String,
    pub headline: String,
    /// Second headline line, drawn with the gradient.
    pub headline_accent: String,
    pub intro: Vec<Run>,
    pub ctas: Vec<CallToAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub eyebrow: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Featured {
    pub heading: String,
    pub index_label: String,
    pub status: String,
    pub company: String,
    pub role: String,
    pub summary: String,
    pub metrics: Vec<Metric>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub role: String,
    pub description: String,
    pub tech: Vec<String>,
    #[serde(default = "default_link")]
    pub link: String,
    #[serde(default = "default_link")]
    pub code_link: String,
    #[serde(default)]
    pub featured: bool,
}

fn default_link() -> String {
    "#".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projects {
    pub heading: String,
    pub index_label: String,
    pub artifact_label: String,
    pub items: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub headline: Vec<String>,
    pub blurb: String,
    pub contacts: Vec<Link>,
    pub meta: Vec<String>,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub nav: Nav,
    pub hero: Hero,
    pub stack: Stack,
    pub featured: Featured,
    pub projects: Projects,
    pub footer: Footer,
}

// =============================================================================
// Loading
// =============================================================================

impl Content {
    /// The built-in portfolio copy.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED, Path::new("<embedded>"))
    }

    /// Parse content from TOML; `origin` names the source in errors.
    pub fn from_toml_str(source: &str, origin: &Path) -> Result<Self> {
        let content: Content = toml::from_str(source).map_err(|source| FolioError::ContentParse {
            path: origin.to_path_buf(),
            source,
        })?;
        debug!(
            origin = %origin.display(),
            projects = content.projects.items.len(),
            categories = content.stack.categories.len(),
            "content parsed"
        );
        Ok(content)
    }

    /// Load content from `path`, or the embedded copy when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::embedded();
        };
        let source = std::fs::read_to_string(path)?;
        let content = Self::from_toml_str(&source, path)?;
        info!(path = %PathBuf::from(path).display(), "content loaded");
        Ok(content)
    }
}

// =============================================================================
// Tests
// =============================================================================
