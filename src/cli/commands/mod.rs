pub mod clear;
pub mod create;
pub mod delete;
pub mod export;
pub mod git;
pub mod github;
pub mod list;
pub mod status;
