pub mod parse;
pub mod snapshot;
