pub mod github_key;
pub mod key_record;
pub mod local_config;
pub mod snapshot;
