pub mod git_config;
