pub mod chat_input;
pub mod layout;
pub mod panels;
