use rust_decimal::Decimal;
use std::str::FromStr;

/// A classified whitespace-delimited token from a scorecard line.
///
/// The classifier is deliberately a small explicit tokenizer instead of a
/// regex, so the accepted shapes are exactly: digits with an optional single
/// decimal point, an optional trailing `%`, or the literal `N/A`.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// e.g. "96%", "87.9%"; raw keeps the trailing `%`.
    Percent { raw: String, value: Decimal },
    /// e.g. "2.7", "68"
    Number { raw: String, value: Decimal },
    /// The literal "N/A" placeholder (case-insensitive).
    NotAvailable,
    /// Anything else: names, codes, free text.
    Word(String),
}

impl Token {
    /// True for tokens that count as metric values (percent, number, N/A).
    pub fn is_metric_value(&self) -> bool {
        matches!(
            self,
            Token::Percent { .. } | Token::Number { .. } | Token::NotAvailable
        )
    }

    /// The raw source string; N/A is canonicalized to "N/A".
    pub fn raw(&self) -> &str {
        match self {
            Token::Percent { raw, .. } | Token::Number { raw, .. } => raw,
            Token::NotAvailable => "N/A",
            Token::Word(w) => w,
        }
    }

}

/// Classify a single whitespace-delimited token.
pub fn classify_token(s: &str) -> Token {
    let s = s.trim();

    if s.eq_ignore_ascii_case("n/a") {
        return Token::NotAvailable;
    }

    if let Some(body) = s.strip_suffix('%') {
        if let Some(value) = parse_plain_number(body) {
            return Token::Percent {
                raw: s.to_string(),
                value,
            };
        }
    }

    if let Some(value) = parse_plain_number(s) {
        return Token::Number {
            raw: s.to_string(),
            value,
        };
    }

    Token::Word(s.to_string())
}

/// Split a line into classified tokens, left to right.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace().map(classify_token).collect()
}

/// Accept digits with at most one interior decimal point: "68", "2.7",
/// "87.9". Rejects signs, thousands separators, leading/trailing dots, and
/// anything containing a letter (so campaign codes like "24KWL" stay words).
fn parse_plain_number(s: &str) -> Option<Decimal> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if s.chars().filter(|&c| c == '.').count() > 1 {
        return None;
    }
    if s.starts_with('.') || s.ends_with('.') {
        return None;
    }
    Decimal::from_str(s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_token() {
        let t = classify_token("87.9%");
        assert_eq!(
            t,
            Token::Percent {
                raw: "87.9%".into(),
                value: dec!(87.9)
            }
        );
        assert!(t.is_metric_value());
        assert_eq!(t.raw(), "87.9%");
    }

    #[test]
    fn test_number_token() {
        assert_eq!(
            classify_token("2.7"),
            Token::Number {
                raw: "2.7".into(),
                value: dec!(2.7)
            }
        );
    }

    #[test]
    fn test_integer_token() {
        assert_eq!(
            classify_token("68"),
            Token::Number {
                raw: "68".into(),
                value: dec!(68)
            }
        );
    }

    #[test]
    fn test_not_available_case_insensitive() {
        assert_eq!(classify_token("N/A"), Token::NotAvailable);
        assert_eq!(classify_token("n/a"), Token::NotAvailable);
        assert_eq!(classify_token("N/A").raw(), "N/A");
    }

    #[test]
    fn test_campaign_code_is_word() {
        assert_eq!(classify_token("24KWL"), Token::Word("24KWL".into()));
    }

    #[test]
    fn test_malformed_numbers_are_words() {
        assert_eq!(classify_token(".5"), Token::Word(".5".into()));
        assert_eq!(classify_token("5."), Token::Word("5.".into()));
        assert_eq!(classify_token("1.2.3"), Token::Word("1.2.3".into()));
        assert_eq!(classify_token("-4"), Token::Word("-4".into()));
        assert_eq!(classify_token("%"), Token::Word("%".into()));
    }

    #[test]
    fn test_tokenize_full_metric_line() {
        let tokens = tokenize("96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6");
        assert_eq!(tokens.len(), 11);
        assert!(tokens.iter().all(Token::is_metric_value));
        assert_eq!(tokens[0].raw(), "96%");
        assert_eq!(tokens[10].raw(), "5.6");
    }

    #[test]
    fn test_tokenize_mixed_line() {
        let tokens = tokenize("Wichita Kenworth 96% N/A");
        assert_eq!(tokens[0], Token::Word("Wichita".into()));
        assert_eq!(tokens[1], Token::Word("Kenworth".into()));
        assert!(tokens[2].is_metric_value());
        assert_eq!(tokens[3], Token::NotAvailable);
    }
}
