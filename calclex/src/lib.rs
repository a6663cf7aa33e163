mod scanner;
mod token;
mod tokenizer;

pub use scanner::Scanner;
pub use token::{Token, TokenType, FUNCTIONS};
pub use tokenizer::{tokenize, LexError, Tokenizer};
