//! Shell-like tokenizing of a single command-line string.

/// Lexer state. `Reading` treats quote characters as literal data; quoting
/// only begins from `Skipping`, i.e. at a token boundary or right after a
/// closing quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Skipping,
    Reading,
    Single,
    Double,
}

/// Split a command-line string into tokens.
///
/// Whitespace (space, tab) separates tokens. Single quotes group verbatim;
/// double quotes group with backslash escapes (`\n`, `\t`, `\r`, `\b`,
/// `\f`, `\v`; any other escaped character is passed through literally).
/// Quoted segments adjacent to other content with no intervening
/// whitespace join the same token: `'a'"b"` is one token `ab`.
///
/// Unterminated quotes are not an error; the lexer runs to end-of-input
/// and emits whatever accumulated. Empty tokens are never emitted, so a
/// whitespace-only line yields an empty vector.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut state = State::Skipping;

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match state {
            State::Skipping => match c {
                ' ' | '\t' => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                _ => {
                    current.push(c);
                    state = State::Reading;
                }
            },
            State::Reading => match c {
                ' ' | '\t' => {
                    tokens.push(std::mem::take(&mut current));
                    state = State::Skipping;
                }
                _ => current.push(c),
            },
            State::Single => match c {
                '\'' => state = State::Skipping,
                _ => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Skipping,
                '\\' => {
                    // An escape at end-of-input has nothing to map and is
                    // dropped along with the backslash.
                    if let Some(escaped) = chars.next() {
                        current.push(unescape(escaped));
                    }
                }
                _ => current.push(c),
            },
        }
    }

    tokens.push(current);
    tokens.retain(|t| !t.is_empty());
    tokens
}

fn unescape(c: char) -> char {
    match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize("apple carrot"), ["apple", "carrot"]);
        assert_eq!(tokenize("  apple \t carrot  "), ["apple", "carrot"]);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn single_quotes_group_verbatim() {
        assert_eq!(tokenize("'a b' c"), ["a b", "c"]);
        assert_eq!(tokenize(r"'no \n escape'"), [r"no \n escape"]);
    }

    #[test]
    fn double_quotes_decode_escapes() {
        assert_eq!(tokenize(r#""x\ny""#), ["x\ny"]);
        assert_eq!(tokenize(r#""a\tb\rc""#), ["a\tb\rc"]);
        assert_eq!(tokenize(r#""\b\f\v""#), ["\u{8}\u{c}\u{b}"]);
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(tokenize(r#""a\qb""#), ["aqb"]);
        assert_eq!(tokenize(r#""say \"hi\"""#), ["say \"hi\""]);
    }

    #[test]
    fn trailing_escape_is_dropped() {
        assert_eq!(tokenize(r#""ab\"#), ["ab"]);
    }

    #[test]
    fn adjacent_quoted_segments_join() {
        assert_eq!(tokenize(r#"'a'"b""#), ["ab"]);
        assert_eq!(tokenize(r#"'pre'fix more"#), ["prefix", "more"]);
    }

    #[test]
    fn quotes_inside_reading_are_literal() {
        assert_eq!(tokenize("a'b'c"), ["a'b'c"]);
        assert_eq!(tokenize("don't"), ["don't"]);
    }

    #[test]
    fn empty_quotes_emit_no_token() {
        assert!(tokenize("''").is_empty());
        assert_eq!(tokenize("'' x \"\""), ["x"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(tokenize("'a b"), ["a b"]);
        assert_eq!(tokenize("\"a b"), ["a b"]);
        assert!(tokenize("'").is_empty());
    }
}
