#![deny(warnings)]

use log::{debug, trace};
use thiserror::Error;

use crate::scanner::Scanner;
use crate::token::{Token, TokenType, FUNCTIONS};

static WHITE: &[char] = &[' ', '\n', '\r', '\t'];
static NUMBER_TAIL: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unrecognized character '{character}' at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },
    #[error("unrecognized function name at position {position}")]
    UnrecognizedFunctionName { position: usize },
    #[error("malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },
}

/// Streams tokens out of a char source. Stops for good after the first error.
pub struct Tokenizer<I: Iterator<Item=char>> {
    src: Scanner<I>,
    failed: bool,
}

impl<I: Iterator<Item=char>> Tokenizer<I> {
    pub fn new(source: I) -> Self {
        Tokenizer{src: Scanner::new(source), failed: false}
    }

    fn get_token(&mut self) -> Option<Result<Token, LexError>> {
        self.src.skip_all(WHITE);
        self.src.ignore();
        let position = self.src.start();
        let c = self.src.next()?;
        let kind = match c {
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' if self.src.accept(&'*').is_some() => TokenType::Pow,
            '*' | 'x' | 'X' | '×' => TokenType::Mul,
            '/' if self.src.accept(&'/').is_some() => TokenType::FDiv,
            '/' | '÷' => TokenType::Div,
            '^' => TokenType::Pow,
            '!' => TokenType::Factorial,
            '(' | '[' | '{' => TokenType::Open,
            ')' | ']' | '}' => TokenType::Close,
            ',' => TokenType::Comma,
            c if c.is_ascii_digit() => return Some(self.scan_number(position)),
            c if FUNCTIONS.iter().any(|(name, _)| name.starts_with(c)) => {
                return Some(self.scan_function(c, position));
            }
            character => {
                debug!("unrecognized character {:?} at {}", character, position);
                return Some(Err(LexError::UnrecognizedCharacter{character, position}));
            }
        };
        self.src.ignore();
        let token = Token::new(kind, canonical(kind), position);
        trace!("{:?} '{}' at {}", token.kind(), token.literal(), position);
        Some(Ok(token))
    }

    // the leading digit is already consumed
    fn scan_number(&mut self, position: usize) -> Result<Token, LexError> {
        self.src.skip_all(NUMBER_TAIL);
        let literal = self.src.extract_string();
        if literal.matches('.').count() > 1 {
            debug!("malformed number '{}' at {}", literal, position);
            return Err(LexError::MalformedNumber{literal, position});
        }
        trace!("Number '{}' at {}", literal, position);
        Ok(Token::new(TokenType::Number, literal, position))
    }

    // the first char of the name is already consumed
    fn scan_function(&mut self, first: char, position: usize) -> Result<Token, LexError> {
        let backtrack = self.src.pos();
        let mut matched: Option<(usize, TokenType)> = None;
        for &(name, kind) in FUNCTIONS.iter() {
            let rest: Vec<char> = name.chars().skip(1).collect();
            if name.starts_with(first) && self.src.accept_all(&rest) {
                if matched.map_or(true, |(len, _)| rest.len() > len) {
                    matched = Some((rest.len(), kind));
                }
                self.src.set_pos(backtrack);
            }
        }
        match matched {
            Some((len, kind)) => {
                self.src.set_pos(backtrack + len as isize);
                let literal = self.src.extract_string();
                trace!("{:?} '{}' at {}", kind, literal, position);
                Ok(Token::new(kind, literal, position))
            }
            None => {
                debug!("unrecognized function name at {}", position);
                Err(LexError::UnrecognizedFunctionName{position})
            }
        }
    }
}

fn canonical(kind: TokenType) -> &'static str {
    match kind {
        TokenType::Plus => "+",
        TokenType::Minus => "-",
        TokenType::Mul => "*",
        TokenType::Div => "/",
        TokenType::FDiv => "//",
        TokenType::Factorial => "!",
        TokenType::Pow => "^",
        TokenType::Open => "(",
        TokenType::Close => ")",
        TokenType::Comma => ",",
        TokenType::Round => "round",
        TokenType::Root => "root",
        TokenType::Number => "",
    }
}

impl<I: Iterator<Item=char>> Iterator for Tokenizer<I> {
    type Item = Result<Token, LexError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.get_token();
        self.failed = matches!(token, Some(Err(_)));
        token
    }
}

/// Tokenize a whole expression, failing on the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input.chars()).collect()
}
