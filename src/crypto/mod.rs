pub mod password;
pub mod token;

pub use password::{generate_salt, hash_password, verify_password};
pub use token::{TokenClaims, TokenIssuer};
