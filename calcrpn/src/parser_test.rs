use crate::parser::{to_rpn, CalcError, ParseError, RPNExpr, ShuntingParser};
use calclex::{tokenize, LexError, Token, TokenType};

fn postfix(input: &str) -> String {
    ShuntingParser::parse_str(input).unwrap().postfix()
}

fn parse_err(input: &str) -> ParseError {
    match ShuntingParser::parse_str(input) {
        Err(CalcError::Parse(e)) => e,
        other => panic!("{:?} should fail to parse, got {:?}", input, other),
    }
}

#[test]
fn test_parse_sample() {
    let rpn = to_rpn(&tokenize("1 + 2 + round(3, 4)").unwrap()).unwrap();
    let expect = [
        Token::new(TokenType::Number, "1", 0),
        Token::new(TokenType::Number, "2", 4),
        Token::new(TokenType::Plus, "+", 2),
        Token::new(TokenType::Number, "3", 14),
        Token::new(TokenType::Number, "4", 17),
        Token::new(TokenType::Round, "round", 8),
        Token::new(TokenType::Plus, "+", 6),
    ];
    assert_eq!(rpn.len(), expect.len());
    for (i, token) in expect.iter().enumerate() {
        assert_eq!(rpn[i], *token);
    }
}

#[test]
fn test_sub_range() {
    let tokens = vec![
        Token::new(TokenType::Number, "3", 0),
        Token::new(TokenType::Comma, ",", 1),
        Token::new(TokenType::Number, "4", 3),
    ];
    let rpn = to_rpn(&tokens).unwrap();
    assert_eq!(rpn, RPNExpr(vec![tokens[0].clone(), tokens[2].clone()]));
}

#[test]
fn test_empty() {
    assert_eq!(to_rpn(&[]), Ok(RPNExpr(vec![])));
    assert_eq!(ShuntingParser::parse_str("  \t"), Ok(RPNExpr::default()));
}

#[test]
fn test_precedence() {
    let tests = [
        ("3 + 4 * 2", "3 4 2 * +"),
        ("3 * 4 + 2", "3 4 * 2 +"),
        ("8 / 4 / 2", "8 4 / 2 /"),
        ("7 // 2 * 3", "7 2 // 3 *"),
        ("2 ^ 3 ^ 2", "2 3 2 ^ ^"),
        ("2 ** 3 x 4", "2 3 ^ 4 *"),
        ("3! ^ 2", "3 ! 2 ^"),
        ("2 ^ 3!", "2 3 ! ^"),
        ("(1 + 2) * 3", "1 2 + 3 *"),
        ("{[(1)]}", "1"),
    ];
    for (input, expect) in tests.iter() {
        assert_eq!(postfix(input), *expect, "{}", input);
    }
}

#[test]
fn test_minus() {
    let tests = [
        ("-3", "3 -"),
        ("--3", "3 - -"),
        ("5 - 3", "5 3 - +"),
        ("5 - 3 - 1", "5 3 - + 1 - +"),
        ("2 * -3", "2 3 - *"),
        ("-2 * 3", "2 - 3 *"),
        ("-2 ^ 2", "2 2 ^ -"),
        ("2 ^ -2", "2 2 - ^"),
        ("-3!", "3 ! -"),
        ("3! - 1", "3 ! 1 - +"),
        ("(4) - 1", "4 1 - +"),
    ];
    for (input, expect) in tests.iter() {
        assert_eq!(postfix(input), *expect, "{}", input);
    }
}

#[test]
fn test_minus_is_always_unary() {
    let rpn = ShuntingParser::parse_str("10 - 4 - -2").unwrap();
    let mut depth: isize = 0;
    for token in rpn.iter() {
        match token.kind().arity() {
            Some(arity) => depth -= arity as isize - 1,
            None => depth += 1,
        }
        assert!(depth >= 1);
    }
    assert_eq!(depth, 1);
}

#[test]
fn test_functions() {
    let tests = [
        ("round(3.14159, 2)", "3.14159 2 round"),
        ("root(27, 3) + 1", "27 3 root 1 +"),
        ("2 * round(root(8, 3), 1)", "2 8 3 root 1 round *"),
        ("round((1 + 2) * 3, root(4, 2))", "1 2 + 3 * 4 2 root round"),
        ("-round(1.5, 0)!", "1.5 0 round ! -"),
    ];
    for (input, expect) in tests.iter() {
        assert_eq!(postfix(input), *expect, "{}", input);
    }
}

#[test]
fn test_argument_list() {
    assert_eq!(postfix("1, 2 + 3, 4"), "1 2 3 + 4");
    assert_eq!(postfix("round(1, 2), -3"), "1 2 round 3 -");
}

#[test]
fn bad_brackets() {
    assert_eq!(parse_err("round(1, 2"), ParseError::UnbalancedBrackets{position: 5});
    assert_eq!(parse_err("(1 + (2)"), ParseError::UnbalancedBrackets{position: 0});
    assert_eq!(parse_err("1 + 2)"), ParseError::UnbalancedBrackets{position: 5});
    assert_eq!(parse_err(")("), ParseError::UnbalancedBrackets{position: 0});
    assert_eq!(parse_err("round(1, 2))"), ParseError::UnbalancedBrackets{position: 11});
}

#[test]
fn bad_arity() {
    let tests = [
        ("round(1)", ParseError::ArityMismatch{position: 0, expected: 2, found: 1}),
        ("root(1, 2, 3)", ParseError::ArityMismatch{position: 0, expected: 2, found: 3}),
        ("round()", ParseError::ArityMismatch{position: 0, expected: 2, found: 0}),
        ("1 + root 8", ParseError::ArityMismatch{position: 4, expected: 2, found: 0}),
        ("round(1,)", ParseError::ArityMismatch{position: 7, expected: 1, found: 0}),
        ("round(,1)", ParseError::ArityMismatch{position: 6, expected: 1, found: 0}),
        ("()", ParseError::ArityMismatch{position: 0, expected: 1, found: 0}),
        ("(1, 2)", ParseError::ArityMismatch{position: 0, expected: 1, found: 2}),
        ("3 4", ParseError::ArityMismatch{position: 2, expected: 1, found: 2}),
        ("2 (3)", ParseError::ArityMismatch{position: 2, expected: 1, found: 2}),
        ("1 +", ParseError::ArityMismatch{position: 2, expected: 2, found: 1}),
        ("2 * -", ParseError::ArityMismatch{position: 4, expected: 1, found: 0}),
        ("-", ParseError::ArityMismatch{position: 0, expected: 1, found: 0}),
    ];
    for (input, expect) in tests.iter() {
        assert_eq!(parse_err(input), *expect, "{}", input);
    }
}

#[test]
fn unexpected_tokens() {
    assert_eq!(
        parse_err("* 2"),
        ParseError::UnexpectedToken{literal: "*".to_string(), position: 0});
    assert_eq!(
        parse_err("1 + !"),
        ParseError::UnexpectedToken{literal: "!".to_string(), position: 4});
    assert_eq!(
        parse_err("2 ^ // 3"),
        ParseError::UnexpectedToken{literal: "//".to_string(), position: 4});
    assert_eq!(
        parse_err("+1"),
        ParseError::UnexpectedToken{literal: "+".to_string(), position: 0});
}

#[test]
fn lex_errors_pass_through() {
    assert_eq!(
        ShuntingParser::parse_str("1 + @"),
        Err(CalcError::Lex(LexError::UnrecognizedCharacter{character: '@', position: 4})));
    assert_eq!(
        ShuntingParser::parse_str("ro(1, 2)"),
        Err(CalcError::Lex(LexError::UnrecognizedFunctionName{position: 0})));
}

#[test]
fn deep_nesting() {
    let depth = 200;
    let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(postfix(&input), "1");
}
