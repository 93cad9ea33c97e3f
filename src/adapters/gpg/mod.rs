pub mod colon_parser;
pub mod gpg_backend;
