pub mod user;

pub use user::{InMemoryUserDirectory, UserContact, UserDirectory};
