use crate::parser::{precedence, Assoc, Fixity, RPNExpr};
use calclex::{Token, TokenType};
use std::fmt;

#[derive(Debug, Clone)]
enum AST<'a> {
    Leaf(&'a Token),
    Node(&'a Token, Vec<AST<'a>>),
}

impl RPNExpr {
    // One tree per top-level argument, None if the tokens don't fold into trees.
    fn build_ast(&self) -> Option<Vec<AST>> {
        let mut ops = Vec::new();
        for token in self.0.iter() {
            match token.kind() {
                TokenType::Number => ops.push(AST::Leaf(token)),
                kind => {
                    let arity = kind.arity()?;
                    let n = ops.len().checked_sub(arity)?;
                    let operands = ops.split_off(n);
                    ops.push(AST::Node(token, operands));
                }
            }
        }
        Some(ops)
    }
}

fn fixity(token: &Token) -> Fixity {
    match token.kind() {
        TokenType::Minus => Fixity::Prefix,
        TokenType::Factorial => Fixity::Postfix,
        _ => Fixity::Infix,
    }
}

// `a b - +` coming out of a subtraction, told apart from `a + -b` by the
// synthetic '+' sharing the position of its '-'
fn as_subtraction<'t, 'a>(token: &Token, args: &'t [AST<'a>]) -> Option<(&'t AST<'a>, &'t AST<'a>)> {
    if token.kind() != TokenType::Plus {
        return None;
    }
    match args {
        [lhs, AST::Node(neg, rhs)] if neg.kind() == TokenType::Minus
            && neg.position() == token.position() && rhs.len() == 1 => Some((lhs, &rhs[0])),
        _ => None,
    }
}

fn binary(op: &str, lhs: (String, (usize, Assoc)), rhs: (String, (usize, Assoc)),
          (prec, assoc): (usize, Assoc)) -> (String, (usize, Assoc)) {
    let lh = if prec > (lhs.1).0 || (prec == (lhs.1).0 && assoc != Assoc::Left) {
        format!("({})", lhs.0)
    } else {
        lhs.0
    };
    let rh = if prec > (rhs.1).0 || (prec == (rhs.1).0 && assoc != Assoc::Right) {
        format!("({})", rhs.0)
    } else {
        rhs.0
    };
    // NOTE: '2+(3+4)' will show parens to indicate that user
    // explicitly put them there
    (format!("{} {} {}", lh, op, rh), (prec, assoc))
}

fn printer(root: &AST) -> (String, (usize, Assoc)) {
    match root {
        AST::Leaf(token) => (token.literal().to_string(), precedence(token.kind(), Fixity::Infix)),
        AST::Node(token, args) => {
            if let Some((lhs, rhs)) = as_subtraction(token, args) {
                let prec = precedence(TokenType::Minus, Fixity::Infix);
                return binary("-", printer(lhs), printer(rhs), prec);
            }
            let (prec, assoc) = precedence(token.kind(), fixity(token));
            match (token.kind(), args.as_slice()) {
                (kind, _) if kind.is_function() => {
                    let expr = args
                        .iter()
                        .map(|leaf| printer(leaf).0)
                        .collect::<Vec<String>>()
                        .join(", ");
                    (format!("{}({})", token, expr), (prec, assoc))
                }
                (TokenType::Minus, [arg]) => {
                    let subtree = printer(arg);
                    if prec > (subtree.1).0 {
                        (format!("-({})", subtree.0), (prec, assoc))
                    } else {
                        (format!("-{}", subtree.0), (prec, assoc))
                    }
                }
                (TokenType::Factorial, [arg]) => {
                    let subtree = printer(arg);
                    if prec > (subtree.1).0 {
                        (format!("({})!", subtree.0), (prec, assoc))
                    } else {
                        (format!("{}!", subtree.0), (prec, assoc))
                    }
                }
                (_, [lhs, rhs]) => binary(token.literal(), printer(lhs), printer(rhs), (prec, assoc)),
                _ => unreachable!("build_ast sizes nodes by arity"),
            }
        }
    }
}

impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.build_ast() {
            Some(trees) => {
                let args = trees.iter().map(|t| printer(t).0).collect::<Vec<String>>();
                write!(f, "{}", args.join(", "))
            }
            None => write!(f, "{}", self.postfix()),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::parser::{RPNExpr, ShuntingParser};
    use calclex::{Token, TokenType};

    fn roundtrip(input: &str) -> String {
        ShuntingParser::parse_str(input).unwrap().to_string()
    }

    #[test]
    fn minimal_parens() {
        let tests = [
            ("1 + 2 + round(3, 4)", "1 + 2 + round(3, 4)"),
            ("(1 + 2) * 3", "(1 + 2) * 3"),
            ("1 + (2 * 3)", "1 + 2 * 3"),
            ("2 + (3 + 4)", "2 + (3 + 4)"),
            ("2 ^ 3 ^ 2", "2 ^ 3 ^ 2"),
            ("(2 ^ 3) ^ 2", "(2 ^ 3) ^ 2"),
            ("[8 // 3] x 2", "8 // 3 * 2"),
            ("root(27, 3)!", "root(27, 3)!"),
            ("(2 + 3)!", "(2 + 3)!"),
        ];
        for (input, expect) in tests.iter() {
            assert_eq!(roundtrip(input), *expect);
        }
    }

    #[test]
    fn minus_forms() {
        let tests = [
            ("5 - 3 - 1", "5 - 3 - 1"),
            ("5 - (3 - 1)", "5 - (3 - 1)"),
            ("5 + -3", "5 + -3"),
            ("-2 ^ 2", "-2 ^ 2"),
            ("(-2) ^ 2", "(-2) ^ 2"),
            ("-(1 + 2)", "-(1 + 2)"),
            ("2 - -3", "2 - -3"),
        ];
        for (input, expect) in tests.iter() {
            assert_eq!(roundtrip(input), *expect);
        }
    }

    #[test]
    fn argument_list() {
        assert_eq!(roundtrip("3, 4 * 2"), "3, 4 * 2");
        assert_eq!(RPNExpr::default().to_string(), "");
    }

    #[test]
    fn broken_rpn_prints_postfix() {
        let rpn = RPNExpr(vec![
            Token::new(TokenType::Number, "1", 0),
            Token::new(TokenType::Plus, "+", 2),
        ]);
        assert_eq!(rpn.to_string(), "1 +");
        assert_eq!(rpn.postfix(), "1 +");
    }
}
