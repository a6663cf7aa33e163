#![deny(warnings)]

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenType {
    // operators
    Plus, Minus, Mul, Div, FDiv, Factorial, Pow,
    // brackets, every glyph variant folds into this pair
    Open, Close,
    // functions
    Round, Root,
    Comma,
    Number,
}

/// Named functions in lookup order. The tokenizer picks the longest name
/// matching at the cursor so a name may safely prefix another.
pub static FUNCTIONS: &[(&str, TokenType)] = &[
    ("round", TokenType::Round),
    ("root", TokenType::Root),
];

impl TokenType {
    pub fn is_operator(self) -> bool {
        use TokenType::*;
        matches!(self, Plus | Minus | Mul | Div | FDiv | Factorial | Pow)
    }

    pub fn is_function(self) -> bool {
        matches!(self, TokenType::Round | TokenType::Root)
    }

    /// Number of operands an operator or function consumes.
    /// Minus is always negation here, subtraction is `a + (-b)`.
    pub fn arity(self) -> Option<usize> {
        use TokenType::*;
        match self {
            Plus | Pow | Mul | Div | FDiv | Round | Root => Some(2),
            Factorial | Minus => Some(1),
            Open | Close | Comma | Number => None,
        }
    }
}

/// A classified fragment of the input. `position` is the index of the
/// character the token started at.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    kind: TokenType,
    literal: String,
    position: usize,
}

impl Token {
    pub fn new(kind: TokenType, literal: impl Into<String>, position: usize) -> Self {
        Token{kind, literal: literal.into(), position}
    }

    pub fn kind(&self) -> TokenType { self.kind }

    pub fn literal(&self) -> &str { &self.literal }

    pub fn position(&self) -> usize { self.position }

    pub fn value(&self) -> Option<f64> {
        match self.kind {
            TokenType::Number => self.literal.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

///////////////////////////////////////////////////////////////////////////////
