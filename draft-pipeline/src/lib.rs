pub mod generation;
pub mod orchestrator;
pub mod prompt;
pub mod stores;
pub mod validator;
