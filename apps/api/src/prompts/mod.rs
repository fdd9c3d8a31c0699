//! Prompt template management: four template slots (summary/rating crossed
//! with system/user) backed by built-in defaults, file-backed overrides and
//! admin endpoints for editing at runtime.

pub mod defaults;
pub mod handlers;
pub mod store;

pub use store::{PromptSnapshot, PromptStore};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("unknown prompt type '{0}' (expected 'summary' or 'rating')")]
    UnknownType(String),

    #[error("unknown prompt role '{0}' (expected 'system' or 'user')")]
    UnknownRole(String),

    #[error("prompt content cannot be empty")]
    EmptyContent,

    #[error("prompt storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which pipeline step a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Summary,
    Rating,
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Summary => "summary",
            PromptType::Rating => "rating",
        }
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptType {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(PromptType::Summary),
            "rating" => Ok(PromptType::Rating),
            _ => Err(PromptError::UnknownType(s.to_string())),
        }
    }
}

/// Whether a template fills the system or the user message of a chat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
        }
    }
}

impl fmt::Display for PromptRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptRole {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "system" => Ok(PromptRole::System),
            "user" => Ok(PromptRole::User),
            _ => Err(PromptError::UnknownRole(s.to_string())),
        }
    }
}
