//! Built-in prompt templates, compiled into the binary.
//!
//! These are the pristine texts that reset restores. Runtime edits never
//! touch them; they live as override files in a separate directory.

pub const SUMMARY_SYSTEM: &str = include_str!("../../prompts/summary/system.txt");
pub const SUMMARY_USER: &str = include_str!("../../prompts/summary/user.txt");
pub const RATING_SYSTEM: &str = include_str!("../../prompts/rating/system.txt");
pub const RATING_USER: &str = include_str!("../../prompts/rating/user.txt");
