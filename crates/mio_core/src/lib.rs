pub mod core_api;
pub mod extract;
pub mod item;
pub mod layout;
pub mod naming;
pub mod reader;
pub mod shelf;
pub mod version;
