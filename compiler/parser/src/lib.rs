pub use parse_err::*;
pub use parser::*;
pub use rpn::*;

mod parse_err;
mod parser;
mod precedence;
mod rpn;
