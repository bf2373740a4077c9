pub mod career;
pub mod history;
pub mod session;
