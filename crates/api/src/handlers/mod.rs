pub mod author;
pub mod character;
pub mod novel;
