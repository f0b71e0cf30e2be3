use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0, one_of},
    combinator::{map, recognize},
    multi::separated_list1,
    IResult,
};
use crate::token::{Span, Token, TokenKind};

/// Hyphens inside a word are kept so delimited syllables survive.
fn word(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('-'), take_while1(|c: char| c.is_alphabetic())))(input)
}

fn token(input: &str) -> IResult<&str, TokenKind> {
    alt((
        map(word, |_| TokenKind::Word),
        map(one_of(".,;:?!"), TokenKind::Punctuation),
    ))(input)
}

/// Splits free text into words and punctuation with byte spans. Anything
/// else is skipped.
pub fn tokenize(original_input: &str) -> Vec<Token<'_>> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        match token(input) {
            Ok((next_input, kind)) => {
                let start = original_input.len() - input.len();
                let end = original_input.len() - next_input.len();
                result.push(Token {
                    span: Span::new(start, end),
                    text: &original_input[start..end],
                    kind,
                });
                input = next_input;
            }
            Err(_) => {
                // Skip one char and carry on
                if let Some(c) = input.chars().next() {
                    input = &input[c.len_utf8()..];
                } else {
                    break;
                }
            }
        }
    }

    result
}

/// Just the words of `text`.
pub fn split_words(text: &str) -> Vec<&str> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| t.text)
        .collect()
}
