//! Bundled educational content: trading guides and tutorials.
//!
//! Both collections ship with the binary as JSON and are parsed once on first
//! access. A parse failure is logged and yields an empty collection so the Docs
//! screen can still render.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

const DOCS_JSON: &str = include_str!("../../assets/docs.json");
const TUTORIALS_JSON: &str = include_str!("../../assets/tutorials.json");

static DOCS: Lazy<Vec<DocArticle>> = Lazy::new(|| parse_bundle("docs", DOCS_JSON));
static TUTORIALS: Lazy<Vec<Tutorial>> = Lazy::new(|| parse_bundle("tutorials", TUTORIALS_JSON));

fn parse_bundle<T: for<'de> Deserialize<'de>>(name: &str, raw: &str) -> Vec<T> {
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(bundle = name, error = %e, "Failed to parse bundled content");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DocLevel {
    pub const ALL: [DocLevel; 3] = [DocLevel::Beginner, DocLevel::Intermediate, DocLevel::Advanced];
}

impl fmt::Display for DocLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocLevel::Beginner => "Beginner",
            DocLevel::Intermediate => "Intermediate",
            DocLevel::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// One block of article content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocSection {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        items: Vec<String>,
    },
    Code {
        #[serde(default)]
        language: Option<String>,
        content: String,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Image {
        src: String,
        alt: String,
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocArticle {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub level: DocLevel,
    #[serde(default)]
    pub tags: Vec<String>,
    pub sections: Vec<DocSection>,
    pub updated_at: String,
}

impl DocArticle {
    /// Rough reading time at 200 words per minute, never below one minute.
    pub fn reading_minutes(&self) -> usize {
        let words: usize = self
            .sections
            .iter()
            .map(|section| match section {
                DocSection::Heading { text, .. } | DocSection::Paragraph { text } => {
                    text.split_whitespace().count()
                }
                DocSection::List { items } => items.iter().map(|i| i.split_whitespace().count()).sum(),
                DocSection::Code { content, .. } => content.split_whitespace().count(),
                DocSection::Table { rows, .. } => rows.iter().flatten().map(|c| c.split_whitespace().count()).sum(),
                DocSection::Image { .. } => 0,
            })
            .sum();
        (words / 200).max(1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TutorialDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for TutorialDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TutorialDifficulty::Beginner => "beginner",
            TutorialDifficulty::Intermediate => "intermediate",
            TutorialDifficulty::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: TutorialDifficulty,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

pub fn all_docs() -> &'static [DocArticle] {
    &DOCS
}

pub fn find_doc_by_slug(slug: &str) -> Option<&'static DocArticle> {
    DOCS.iter().find(|doc| doc.slug == slug)
}

pub fn docs_by_level(level: DocLevel) -> Vec<&'static DocArticle> {
    DOCS.iter().filter(|doc| doc.level == level).collect()
}

pub fn all_tutorials() -> &'static [Tutorial] {
    &TUTORIALS
}

/// Tutorials visible to readers.
pub fn published_tutorials() -> Vec<&'static Tutorial> {
    TUTORIALS.iter().filter(|t| t.is_published).collect()
}
