pub mod tokens;

pub use tokens::{classify_token, tokenize, Token};
