pub mod api;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod service;

#[cfg(test)]
mod test_support;
