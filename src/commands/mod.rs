pub mod fetch;
pub mod split;
