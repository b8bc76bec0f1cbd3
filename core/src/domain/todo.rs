//! The `Todo` entity and its validity rules.
//!
//! All mutation paths funnel through validation here: `NewTodo::new` for
//! creation drafts and `Todo::apply` for partial updates. A `Todo` value in
//! the rest of the system is therefore always normalized and valid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier assigned by the persistence layer on insert. Never reused.
pub type TodoId = i64;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const TAG_MAX_LEN: usize = 30;
pub const TAGS_MAX: usize = 20;
pub const PRIORITY_MIN: i64 = 0;
pub const PRIORITY_MAX: i64 = 5;

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_done: bool,
    pub priority: i64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated creation draft. The repository assigns `id`, timestamps and
/// `is_done = false` on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub tags: Vec<String>,
}

impl NewTodo {
    /// Build a draft, normalizing and validating every field.
    pub fn new(
        title: &str,
        description: Option<String>,
        priority: i64,
        tags: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            title: normalize_title(title)?,
            description: check_description(description)?,
            priority: check_priority(priority)?,
            tags: normalize_tags(tags)?,
        })
    }
}

/// Partial update: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub is_done: Option<bool>,
}

impl Todo {
    /// Merge a patch into this todo, returning the updated entity with
    /// `updated_at` bumped. Fails with `Error::Validation` if the merged
    /// result violates an invariant (e.g. title cleared to empty).
    pub fn apply(&self, patch: &TodoPatch) -> Result<Todo> {
        Ok(Todo {
            id: self.id,
            title: match &patch.title {
                Some(title) => normalize_title(title)?,
                None => self.title.clone(),
            },
            description: match &patch.description {
                Some(desc) => check_description(Some(desc.clone()))?,
                None => self.description.clone(),
            },
            is_done: patch.is_done.unwrap_or(self.is_done),
            priority: match patch.priority {
                Some(priority) => check_priority(priority)?,
                None => self.priority,
            },
            tags: match &patch.tags {
                Some(tags) => normalize_tags(tags.clone())?,
                None => self.tags.clone(),
            },
            created_at: self.created_at,
            updated_at: Utc::now(),
        })
    }
}

fn normalize_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::Validation(
            "title is required and cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(Error::Validation(format!(
            "title must be {TITLE_MAX_LEN} characters or less"
        )));
    }
    Ok(title.to_string())
}

fn check_description(raw: Option<String>) -> Result<Option<String>> {
    match raw {
        Some(desc) if desc.chars().count() > DESCRIPTION_MAX_LEN => Err(Error::Validation(
            format!("description must be {DESCRIPTION_MAX_LEN} characters or less"),
        )),
        other => Ok(other),
    }
}

fn check_priority(priority: i64) -> Result<i64> {
    if (PRIORITY_MIN..=PRIORITY_MAX).contains(&priority) {
        Ok(priority)
    } else {
        Err(Error::Validation(format!(
            "priority must be an integer between {PRIORITY_MIN} and {PRIORITY_MAX}"
        )))
    }
}

/// Trim, lowercase and deduplicate tags, preserving first occurrence.
/// Blank entries are dropped rather than rejected.
fn normalize_tags(raw: Vec<String>) -> Result<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > TAG_MAX_LEN {
            return Err(Error::Validation(format!(
                "tag must be {TAG_MAX_LEN} characters or less"
            )));
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.len() > TAGS_MAX {
        return Err(Error::Validation(format!("maximum {TAGS_MAX} tags allowed")));
    }
    Ok(tags)
}
