use super::{Error, Expression};
use crate::model::types::{Element, ResidueCategory};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Deepest allowed nesting of `not`, `within` and parentheses.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LeftParen,
    RightParen,
    Word(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Chain,
    ResidueName,
    ResidueNumber,
    AtomName,
    Element,
    Index,
    Within,
    Of,
    And,
    Or,
    Not,
    All,
    None,
    Hydrogen,
    Category(ResidueCategory),
}

impl Keyword {
    fn lookup(word: &str) -> Option<Self> {
        let keyword = match word.to_ascii_lowercase().as_str() {
            "chain" => Self::Chain,
            "resn" | "resname" => Self::ResidueName,
            "resi" | "resid" => Self::ResidueNumber,
            "name" => Self::AtomName,
            "elem" | "element" => Self::Element,
            "index" => Self::Index,
            "within" => Self::Within,
            "of" => Self::Of,
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "all" => Self::All,
            "none" => Self::None,
            "hydrogen" | "hydro" => Self::Hydrogen,
            "protein" => Self::Category(ResidueCategory::Protein),
            "nucleic" => Self::Category(ResidueCategory::Nucleic),
            "water" | "solvent" => Self::Category(ResidueCategory::Water),
            "ion" | "ions" => Self::Category(ResidueCategory::Ion),
            "hetero" | "het" => Self::Category(ResidueCategory::Hetero),
            _ => return None,
        };
        Some(keyword)
    }
}

/// Parses a selection expression.
///
/// Precedence from loosest to tightest is `or`, `and`, `not`; parentheses group.
///
/// # Errors
///
/// Returns [`Error::Parse`] with the byte offset of the first offending token.
pub fn parse(input: &str) -> Result<Expression, Error> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(Error::parse(0, "empty selection"));
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        end: input.len(),
        depth: 0,
    };
    let expression = parser.parse_or()?;

    if let Some((token, position)) = parser.peek() {
        return Err(Error::parse(
            position,
            format!("unexpected {} after expression", describe(token)),
        ));
    }
    Ok(expression)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.cursor).map(|(t, p)| (t, *p))
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        match self.peek() {
            Some((Token::Word(word), _)) => Keyword::lookup(word),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |(_, p)| p)
    }

    fn parse_or(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_and()?;
        while self.peek_keyword() == Some(Keyword::Or) {
            self.next();
            let right = self.parse_and()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_not()?;
        while self.peek_keyword() == Some(Keyword::And) {
            self.next();
            let right = self.parse_not()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression, Error> {
        if self.depth == MAX_DEPTH {
            return Err(Error::parse(
                self.position(),
                format!("selection is nested more than {} levels deep", MAX_DEPTH),
            ));
        }
        self.depth += 1;
        let result = self.parse_unary();
        self.depth -= 1;
        result
    }

    fn parse_unary(&mut self) -> Result<Expression, Error> {
        if self.peek_keyword() == Some(Keyword::Not) {
            self.next();
            let inner = self.parse_not()?;
            return Ok(Expression::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression, Error> {
        let position = self.position();
        let Some((token, _)) = self.next() else {
            return Err(Error::parse(position, "expected a selection term"));
        };

        let word = match token {
            Token::LeftParen => {
                let inner = self.parse_or()?;
                return match self.next() {
                    Some((Token::RightParen, _)) => Ok(inner),
                    _ => Err(Error::parse(position, "unbalanced '('")),
                };
            }
            Token::RightParen => return Err(Error::parse(position, "unexpected ')'")),
            Token::Word(word) => word,
        };

        let Some(keyword) = Keyword::lookup(&word) else {
            return Err(Error::parse(position, format!("unknown keyword '{}'", word)));
        };

        match keyword {
            Keyword::All => Ok(Expression::All),
            Keyword::None => Ok(Expression::None),
            Keyword::Hydrogen => Ok(Expression::Hydrogen),
            Keyword::Category(category) => Ok(Expression::Category(category)),
            Keyword::Chain => {
                let (value, _) = self.value(&word)?;
                Ok(Expression::Chain(split_list(&value)))
            }
            Keyword::ResidueName => {
                let (value, _) = self.value(&word)?;
                Ok(Expression::ResidueName(
                    split_list(&value).iter().map(|s| s.to_ascii_uppercase()).collect(),
                ))
            }
            Keyword::AtomName => {
                let (value, _) = self.value(&word)?;
                Ok(Expression::AtomName(
                    split_list(&value).iter().map(|s| s.to_ascii_uppercase()).collect(),
                ))
            }
            Keyword::Element => {
                let (value, at) = self.value(&word)?;
                let elements = split_list(&value)
                    .iter()
                    .map(|s| {
                        Element::from_str(s)
                            .map_err(|_| Error::parse(at, format!("unknown element '{}'", s)))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expression::Element(elements))
            }
            Keyword::ResidueNumber => {
                let (value, at) = self.value(&word)?;
                Ok(Expression::ResidueNumber(parse_ranges(&value, at)?))
            }
            Keyword::Index => {
                let (value, at) = self.value(&word)?;
                Ok(Expression::Index(parse_ranges(&value, at)?))
            }
            Keyword::Within => self.parse_within(),
            Keyword::Of | Keyword::And | Keyword::Or | Keyword::Not => Err(Error::parse(
                position,
                format!("unexpected keyword '{}'", word),
            )),
        }
    }

    fn parse_within(&mut self) -> Result<Expression, Error> {
        let position = self.position();
        let distance = match self.next() {
            Some((Token::Word(word), _)) => word.parse::<f64>().ok(),
            _ => None,
        };
        let distance = distance
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| Error::parse(position, "expected a non-negative distance after 'within'"))?;

        if self.peek_keyword() != Some(Keyword::Of) {
            return Err(Error::parse(self.position(), "expected 'of' after distance"));
        }
        self.next();

        let inner = self.parse_not()?;
        Ok(Expression::Within(distance, Box::new(inner)))
    }

    /// Consumes the value word following a property keyword.
    fn value(&mut self, keyword: &str) -> Result<(String, usize), Error> {
        let position = self.position();
        match self.next() {
            Some((Token::Word(value), at)) if Keyword::lookup(&value).is_none() => Ok((value, at)),
            _ => Err(Error::parse(
                position,
                format!("expected a value after '{}'", keyword.to_ascii_lowercase()),
            )),
        }
    }
}

fn tokenize(input: &str) -> Vec<(Token, usize)> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            '(' => {
                tokens.push((Token::LeftParen, position));
                chars.next();
            }
            ')' => {
                tokens.push((Token::RightParen, position));
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut word = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push((Token::Word(word), position));
            }
        }
    }
    tokens
}

fn describe(token: &Token) -> String {
    match token {
        Token::LeftParen => "'('".to_string(),
        Token::RightParen => "')'".to_string(),
        Token::Word(word) => format!("'{}'", word),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split('+')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `5`, `10-20`, `-3`, or `-5--1` items joined by `+`.
fn parse_ranges<T>(value: &str, position: usize) -> Result<Vec<RangeInclusive<T>>, Error>
where
    T: FromStr + PartialOrd + Copy,
{
    split_list(value)
        .iter()
        .map(|item| {
            let invalid = || Error::parse(position, format!("invalid number or range '{}'", item));
            let split = item
                .char_indices()
                .skip(1)
                .find(|&(_, c)| c == '-')
                .map(|(i, _)| i);

            let (start, end) = match split {
                Some(i) => (&item[..i], &item[i + 1..]),
                None => (item.as_str(), item.as_str()),
            };
            let start: T = start.parse().map_err(|_| invalid())?;
            let end: T = end.parse().map_err(|_| invalid())?;
            if start > end {
                return Err(invalid());
            }
            Ok(start..=end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(e: Expression) -> Box<Expression> {
        Box::new(e)
    }

    #[test]
    fn parses_simple_property_terms() {
        assert_eq!(
            parse("resn lig").unwrap(),
            Expression::ResidueName(vec!["LIG".to_string()])
        );
        assert_eq!(
            parse("chain A+B").unwrap(),
            Expression::Chain(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(
            parse("elem N+O").unwrap(),
            Expression::Element(vec![Element::N, Element::O])
        );
        assert_eq!(
            parse("WATER").unwrap(),
            Expression::Category(ResidueCategory::Water)
        );
    }

    #[test]
    fn parses_numeric_ranges_including_negative_numbers() {
        assert_eq!(
            parse("resi 10-20+25").unwrap(),
            Expression::ResidueNumber(vec![10..=20, 25..=25])
        );
        assert_eq!(
            parse("resi -5--1").unwrap(),
            Expression::ResidueNumber(vec![-5..=-1])
        );
        assert_eq!(parse("index 0-3").unwrap(), Expression::Index(vec![0..=3]));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let parsed = parse("water or protein and not hydrogen").unwrap();

        assert_eq!(
            parsed,
            Expression::Or(
                boxed(Expression::Category(ResidueCategory::Water)),
                boxed(Expression::And(
                    boxed(Expression::Category(ResidueCategory::Protein)),
                    boxed(Expression::Not(boxed(Expression::Hydrogen))),
                )),
            )
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        let parsed = parse("(water or protein) and chain A").unwrap();

        assert!(matches!(parsed, Expression::And(_, _)));
    }

    #[test]
    fn within_takes_distance_and_inner_term() {
        let parsed = parse("water and within 3.5 of (resn LIG)").unwrap();

        assert_eq!(
            parsed,
            Expression::And(
                boxed(Expression::Category(ResidueCategory::Water)),
                boxed(Expression::Within(
                    3.5,
                    boxed(Expression::ResidueName(vec!["LIG".to_string()])),
                )),
            )
        );
    }

    #[test]
    fn reports_position_of_unknown_keyword() {
        let err = parse("water and banana").unwrap_err();

        assert_eq!(
            err,
            Error::Parse {
                position: 10,
                details: "unknown keyword 'banana'".to_string(),
            }
        );
    }

    #[test]
    fn rejects_malformed_expressions() {
        for input in [
            "",
            "   ",
            "resn",
            "resn and",
            "resi 20-10",
            "resi ten",
            "(water",
            "water)",
            "within of water",
            "within -1 of water",
            "within 3 water",
            "elem Xx",
            "and water",
        ] {
            assert!(parse(input).is_err(), "{input:?} should fail");
        }
    }

    #[test]
    fn nesting_is_capped() {
        let shallow = format!("{}water{}", "(".repeat(10), ")".repeat(10));
        assert!(parse(&shallow).is_ok());
        assert!(parse(&format!("{}water", "not ".repeat(MAX_DEPTH - 1))).is_ok());

        let deep_not = format!("{}water", "not ".repeat(100_000));
        let deep_parens = format!("{}water{}", "(".repeat(100_000), ")".repeat(100_000));
        let deep_within = format!("{}water", "within 1 of ".repeat(1_000));

        for input in [deep_not, deep_parens, deep_within] {
            assert!(matches!(parse(&input), Err(Error::Parse { .. })));
        }
    }
}
