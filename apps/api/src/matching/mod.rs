//! Candidate matching: ranks the CV pool against a vacancy description and
//! asks the model for a per-candidate summary and numeric rating.

pub mod handlers;
pub mod service;
