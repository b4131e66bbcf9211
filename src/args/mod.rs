//! CLI argument types and value parsers.
mod cli;
mod parsers;


pub use cli::{BombardArgs, Command, FromFileArgs, HitterArgs, ScrapeArgs, SendArgs};
pub(crate) use parsers::parse_duration_arg;
