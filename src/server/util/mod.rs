pub mod mention;
pub mod page;
pub mod parse;
