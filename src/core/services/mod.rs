pub mod github_flow;
pub mod status_service;
