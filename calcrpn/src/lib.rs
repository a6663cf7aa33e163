extern crate calclex;

pub use parser::precedence;
pub use parser::to_rpn;
pub use parser::{Assoc, Fixity};
pub use parser::{CalcError, ParseError};
pub use parser::RPNExpr;
pub use parser::ShuntingParser;

pub mod parser;
#[cfg(test)]
mod parser_test;

mod rpnprint;
