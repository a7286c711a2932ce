pub use lex::*;
pub use token::*;

mod lex;
mod token;
