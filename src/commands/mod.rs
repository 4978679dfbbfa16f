pub mod parse;
pub mod upload;
pub mod version;
