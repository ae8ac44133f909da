pub mod chat;
pub mod dispatch;
pub mod news;

pub use chat::*;
pub use dispatch::*;
pub use news::*;
