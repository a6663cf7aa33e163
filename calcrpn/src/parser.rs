use calclex::{tokenize, LexError, Token, TokenType};
use log::{debug, trace};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unbalanced bracket at position {position}")]
    UnbalancedBrackets { position: usize },
    #[error("expected {expected} operand(s) at position {position}, found {found}")]
    ArityMismatch { position: usize, expected: usize, found: usize },
    #[error("unexpected '{literal}' at position {position}")]
    UnexpectedToken { literal: String, position: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Assoc {
    Left,
    Right,
    None,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

pub fn precedence(kind: TokenType, fixity: Fixity) -> (usize, Assoc) {
    // Unary minus sits with '^' and is right associative so that -2^2 is
    // -(2^2) while 2^-2 still finds its right operand.
    match (kind, fixity) {
        (TokenType::Plus, _) => (2, Assoc::Left),
        (TokenType::Minus, Fixity::Infix) => (2, Assoc::Left),
        (TokenType::Mul, _) | (TokenType::Div, _) | (TokenType::FDiv, _) => (3, Assoc::Left),
        (TokenType::Minus, _) => (5, Assoc::Right),
        (TokenType::Pow, _) => (5, Assoc::Right),
        (TokenType::Factorial, _) => (6, Assoc::Left),
        (TokenType::Round, _) | (TokenType::Root, _) => (7, Assoc::Left),
        _ => (99, Assoc::None),
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct RPNExpr(pub Vec<Token>);

impl std::ops::Deref for RPNExpr {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl RPNExpr {
    pub fn postfix(&self) -> String {
        self.0.iter().map(Token::literal).collect::<Vec<_>>().join(" ")
    }
}

/// Rearrange infix tokens into postfix order.
///
/// The input is read as a comma separated argument list, so `3, 4` yields
/// `3 4`. Bracketed ranges are converted by a recursive call over the inner
/// slice and spliced into the output. Every `Minus` in the result is a
/// negation: `a - b` comes out as `a b - +`.
pub fn to_rpn(tokens: &[Token]) -> Result<RPNExpr, ParseError> {
    let mut out = Vec::with_capacity(tokens.len());
    convert_arguments(tokens, &mut out, 0)?;
    Ok(RPNExpr(out))
}

pub struct ShuntingParser;

impl ShuntingParser {
    pub fn parse_str(expr: &str) -> Result<RPNExpr, CalcError> {
        Ok(Self::parse(&tokenize(expr)?)?)
    }

    pub fn parse(tokens: &[Token]) -> Result<RPNExpr, ParseError> {
        to_rpn(tokens)
    }
}

// Index of the Close matching the Open at tokens[open].
fn matching_close(tokens: &[Token], open: usize) -> Result<usize, ParseError> {
    let mut depth = 1;
    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        match token.kind() {
            TokenType::Open => depth += 1,
            TokenType::Close => depth -= 1,
            _ => (),
        }
        if depth == 0 {
            return Ok(i);
        }
    }
    let position = tokens[open].position();
    debug!("no closing bracket for the one at {}", position);
    Err(ParseError::UnbalancedBrackets { position })
}

// Converts each top-level comma separated argument, returns how many there were.
fn convert_arguments(tokens: &[Token], out: &mut Vec<Token>, depth: usize) -> Result<usize, ParseError> {
    if tokens.is_empty() {
        return Ok(0);
    }
    trace!("converting {} tokens at depth {}", tokens.len(), depth);
    let mut argc = 0;
    let mut begin = 0;
    let mut i = 0;
    while i <= tokens.len() {
        match tokens.get(i).map(Token::kind) {
            Some(TokenType::Open) => i = matching_close(tokens, i)?,
            Some(TokenType::Close) => {
                let position = tokens[i].position();
                debug!("closing bracket at {} was never opened", position);
                return Err(ParseError::UnbalancedBrackets { position });
            }
            Some(TokenType::Comma) | None => {
                if begin == i {
                    // empty argument, blame the comma that delimits it
                    let position = tokens.get(i).unwrap_or_else(|| &tokens[i - 1]).position();
                    debug!("empty argument at {}", position);
                    return Err(ParseError::ArityMismatch { position, expected: 1, found: 0 });
                }
                convert_expr(&tokens[begin..i], out, depth)?;
                argc += 1;
                begin = i + 1;
            }
            Some(_) => (),
        }
        i += 1;
    }
    Ok(argc)
}

// Shunting-yard over a single argument: no top-level commas, not empty.
fn convert_expr(tokens: &[Token], out: &mut Vec<Token>, depth: usize) -> Result<(), ParseError> {
    let mut stack: Vec<(&Token, Fixity)> = Vec::new();
    let mut expect_operand = true;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind() {
            TokenType::Number => {
                if !expect_operand {
                    return Err(operand_excess(token));
                }
                out.push(token.clone());
                expect_operand = false;
            }
            TokenType::Open => {
                if !expect_operand {
                    return Err(operand_excess(token));
                }
                let close = matching_close(tokens, i)?;
                let found = convert_arguments(&tokens[i + 1..close], out, depth + 1)?;
                if found != 1 {
                    debug!("group at {} holds {} values", token.position(), found);
                    return Err(ParseError::ArityMismatch {
                        position: token.position(),
                        expected: 1,
                        found,
                    });
                }
                i = close;
                expect_operand = false;
            }
            TokenType::Round | TokenType::Root => {
                if !expect_operand {
                    return Err(operand_excess(token));
                }
                let expected = token.kind().arity().unwrap_or(0);
                let found = match tokens.get(i + 1).map(Token::kind) {
                    Some(TokenType::Open) => {
                        let close = matching_close(tokens, i + 1)?;
                        let found = convert_arguments(&tokens[i + 2..close], out, depth + 1)?;
                        i = close;
                        found
                    }
                    _ => 0,
                };
                if found != expected {
                    debug!("{} at {} called with {} arguments", token, token.position(), found);
                    return Err(ParseError::ArityMismatch {
                        position: token.position(),
                        expected,
                        found,
                    });
                }
                out.push(token.clone());
                expect_operand = false;
            }
            TokenType::Factorial => {
                if expect_operand {
                    return Err(unexpected(token));
                }
                // postfix binds tighter than anything waiting on the stack
                out.push(token.clone());
            }
            TokenType::Minus if expect_operand => stack.push((token, Fixity::Prefix)),
            TokenType::Plus
            | TokenType::Minus
            | TokenType::Mul
            | TokenType::Div
            | TokenType::FDiv
            | TokenType::Pow => {
                if expect_operand {
                    return Err(unexpected(token));
                }
                let (prec_rhs, assoc_rhs) = precedence(token.kind(), Fixity::Infix);
                while let Some((top, fixity)) = stack.last() {
                    let (prec_lhs, _) = precedence(top.kind(), *fixity);
                    if prec_lhs < prec_rhs || (prec_lhs == prec_rhs && assoc_rhs == Assoc::Right) {
                        break;
                    }
                    if let Some((top, fixity)) = stack.pop() {
                        emit(top, fixity, out);
                    }
                }
                stack.push((token, Fixity::Infix));
                expect_operand = true;
            }
            TokenType::Close => {
                debug!("closing bracket at {} was never opened", token.position());
                return Err(ParseError::UnbalancedBrackets { position: token.position() });
            }
            TokenType::Comma => return Err(unexpected(token)),
        }
        i += 1;
    }

    if expect_operand {
        // an operator is left without its right hand side
        let (position, expected, found) = match stack.last() {
            Some((top, Fixity::Infix)) => (top.position(), 2, 1),
            Some((top, _)) => (top.position(), 1, 0),
            None => (tokens[0].position(), 1, 0),
        };
        debug!("dangling operator at {}", position);
        return Err(ParseError::ArityMismatch { position, expected, found });
    }
    while let Some((top, fixity)) = stack.pop() {
        emit(top, fixity, out);
    }
    Ok(())
}

// Subtraction is lowered to adding the negated right hand side.
fn emit(token: &Token, fixity: Fixity, out: &mut Vec<Token>) {
    out.push(token.clone());
    if token.kind() == TokenType::Minus && fixity == Fixity::Infix {
        out.push(Token::new(TokenType::Plus, "+", token.position()));
    }
}

fn unexpected(token: &Token) -> ParseError {
    debug!("unexpected '{}' at {}", token, token.position());
    ParseError::UnexpectedToken {
        literal: token.literal().to_string(),
        position: token.position(),
    }
}

// An operand showed up where an operator was due, eg: `3 4` or `2 (3)`.
fn operand_excess(token: &Token) -> ParseError {
    debug!("operand '{}' at {} follows another operand", token, token.position());
    ParseError::ArityMismatch {
        position: token.position(),
        expected: 1,
        found: 2,
    }
}
