pub mod github;
pub mod keyring;
pub mod prompter;
pub mod signing_config;
