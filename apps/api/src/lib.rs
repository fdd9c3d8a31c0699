pub mod config;
pub mod cost;
pub mod cv;
pub mod errors;
pub mod llm_client;
pub mod matching;
pub mod prompts;
pub mod routes;
pub mod state;
