use plotarm_path::{tokenize, Token};
use proptest::prelude::*;

fn operands(input: &str) -> Vec<String> {
    tokenize(input)
        .unwrap()
        .filter_map(|t| match t {
            Token::Operand(s) => Some(s.to_string()),
            Token::Command(_) => None,
        })
        .collect()
}

#[test]
fn test_glued_numbers_split_on_sign() {
    let tokens: Vec<_> = tokenize("L5-3").unwrap().map(|t| t.to_string()).collect();
    assert_eq!(tokens, vec!["L", "5", "-3"]);
}

#[test]
fn test_unicode_input_does_not_split_inside_characters() {
    let tokens: Vec<_> = tokenize("M1 2 µ").unwrap().collect();
    assert_eq!(tokens.last(), Some(&Token::Operand("µ")));
}

proptest! {
    #[test]
    fn prop_integer_pairs_survive_tokenizing(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let joined = if b < 0 { format!("L{}{}", a, b) } else { format!("L{} {}", a, b) };
        prop_assert_eq!(operands(&joined), vec![a.to_string(), b.to_string()]);
    }

    #[test]
    fn prop_tokenizing_is_repeatable(input in "[MLmlHhVvZz0-9 ,.-]{1,40}") {
        prop_assume!(!input.trim().is_empty());
        let first: Vec<_> = tokenize(&input).unwrap().collect();
        let second: Vec<_> = tokenize(&input).unwrap().collect();
        prop_assert_eq!(first, second);
    }
}
