pub mod history;
pub mod server;
pub mod user;

pub use history::{ChatHistory, MessagesWith};
pub use server::ChatServer;
pub use user::User;
