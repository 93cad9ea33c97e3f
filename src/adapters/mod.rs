pub mod console;
pub mod git;
pub mod github;
pub mod gpg;
pub mod process;
