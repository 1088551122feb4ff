pub mod api;
pub mod assets;
pub mod client;
pub mod config;
pub mod db;
pub mod mcp;

#[cfg(test)]
mod test_support;
