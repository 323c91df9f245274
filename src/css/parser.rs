//! Recursive descent CSS parser.
//!
//! Parses CSS text into a [`Stylesheet`] arena. Uses the logos-based tokenizer
//! from [`crate::css::tokenizer`]. The parser is deliberately lenient: values
//! and preludes are kept as source text, and only structural problems
//! (unbalanced braces, unterminated strings or comments) are errors.

use crate::css::model::{AtRule, AtRuleBody, Declaration, NodeKind, Rule};
use crate::css::tokenizer::{tokenize, Lexeme, Token};
use crate::css::tree::{NodeId, Stylesheet};

/// Errors from CSS parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected {found} at byte {offset}: {message}")]
    UnexpectedToken {
        offset: usize,
        found: String,
        message: String,
    },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("unterminated string at byte {0}")]
    UnterminatedString(usize),
    #[error("unterminated comment at byte {0}")]
    UnterminatedComment(usize),
}

/// At-rules whose blocks contain declarations rather than rules.
const DECLARATION_AT_RULES: &[&str] = &[
    "font-face",
    "page",
    "counter-style",
    "property",
    "font-palette-values",
    "viewport",
];

/// Parse a CSS string into a [`Stylesheet`].
pub fn parse_css(input: &str) -> Result<Stylesheet, ParseError> {
    let tokens = tokenize(input);
    if let Some(bad) = tokens
        .iter()
        .find(|l| matches!(l.token, Token::BadString | Token::BadComment))
    {
        return Err(match bad.token {
            Token::BadString => ParseError::UnterminatedString(bad.span.start),
            _ => ParseError::UnterminatedComment(bad.span.start),
        });
    }

    let mut sheet = Stylesheet::new();
    let mut parser = Parser {
        source: input,
        tokens,
        cursor: 0,
    };
    let root = sheet.root();
    parser.parse_block_contents(&mut sheet, root, false)?;
    Ok(sheet)
}

/// Recursive descent parser state.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Lexeme>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.cursor)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|l| l.token)
    }

    fn advance(&mut self) -> Option<&Lexeme> {
        let lexeme = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(lexeme)
    }

    fn skip_trivia(&mut self) {
        while self.peek().is_some_and(Lexeme::is_trivia) {
            self.cursor += 1;
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let source = self.source;
        match self.advance() {
            Some(lexeme) if lexeme.token == expected => Ok(()),
            Some(lexeme) => Err(ParseError::UnexpectedToken {
                offset: lexeme.span.start,
                found: format!("'{}'", lexeme.text(source)),
                message: format!("expected {expected:?}"),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Parse rules and at-rules into `container` until `}` (when `nested`) or EOF.
    fn parse_block_contents(
        &mut self,
        sheet: &mut Stylesheet,
        container: NodeId,
        nested: bool,
    ) -> Result<(), ParseError> {
        loop {
            self.skip_trivia();
            match self.peek_token() {
                None if nested => {
                    return Err(ParseError::UnexpectedEof("expected '}'".into()));
                }
                None => return Ok(()),
                Some(Token::BraceClose) if nested => return Ok(()),
                Some(Token::BraceClose) => {
                    let offset = self.peek().map_or(0, |l| l.span.start);
                    return Err(ParseError::UnexpectedToken {
                        offset,
                        found: "'}'".into(),
                        message: "no block to close".into(),
                    });
                }
                // Stray semicolons between rules are harmless.
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(Token::AtKeyword) => self.parse_at_rule(sheet, container)?,
                Some(_) => {
                    let rule = self.parse_rule()?;
                    sheet.append(container, NodeKind::Rule(rule));
                }
            }
        }
    }

    /// Collect prelude tokens up to (not including) a top-level `{`, `;` or `}`.
    ///
    /// Returns the cleaned text of each comma-separated part when `split_commas`
    /// is set, else a single part.
    fn parse_prelude(&mut self, split_commas: bool) -> Vec<String> {
        let mut parts = vec![String::new()];
        let mut depth = 0usize;

        while let Some(lexeme) = self.peek() {
            let text = lexeme.text(self.source);
            match lexeme.token {
                Token::BraceOpen | Token::Semicolon | Token::BraceClose if depth == 0 => break,
                Token::ParenOpen | Token::BracketOpen => depth += 1,
                Token::ParenClose | Token::BracketClose => depth = depth.saturating_sub(1),
                Token::Comma if depth == 0 && split_commas => {
                    parts.push(String::new());
                    self.cursor += 1;
                    continue;
                }
                _ => {}
            }
            if let Some(current) = parts.last_mut() {
                match lexeme.token {
                    Token::Comment => {}
                    Token::Whitespace => current.push(' '),
                    _ => current.push_str(text),
                }
            }
            self.cursor += 1;
        }

        parts.iter().map(|part| collapse_whitespace(part)).collect()
    }

    /// Parse a single style rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        let selectors = self.parse_prelude(true);
        self.expect(Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(Token::BraceClose)?;

        Ok(Rule {
            selectors,
            declarations,
        })
    }

    fn parse_at_rule(
        &mut self,
        sheet: &mut Stylesheet,
        container: NodeId,
    ) -> Result<(), ParseError> {
        let source = self.source;
        let name = match self.advance() {
            Some(lexeme) => lexeme.text(source)[1..].to_ascii_lowercase(),
            None => return Err(ParseError::UnexpectedEof("expected at-rule".into())),
        };
        let prelude = self.parse_prelude(false).concat();

        match self.peek_token() {
            Some(Token::Semicolon) => {
                self.advance();
                let at_rule = AtRule::new(name, prelude, AtRuleBody::Statement);
                sheet.append(container, NodeKind::AtRule(at_rule));
            }
            Some(Token::BraceOpen) => {
                self.advance();
                if name.ends_with("keyframes") {
                    let raw = self.parse_raw_block()?;
                    let at_rule = AtRule::new(name, prelude, AtRuleBody::Raw(raw));
                    sheet.append(container, NodeKind::AtRule(at_rule));
                } else if DECLARATION_AT_RULES.contains(&name.as_str()) {
                    let declarations = self.parse_declarations()?;
                    self.expect(Token::BraceClose)?;
                    let body = AtRuleBody::Declarations(declarations);
                    sheet.append(container, NodeKind::AtRule(AtRule::new(name, prelude, body)));
                } else {
                    let at_rule = AtRule::new(name, prelude, AtRuleBody::Rules);
                    let Some(id) = sheet.append(container, NodeKind::AtRule(at_rule)) else {
                        return Ok(());
                    };
                    self.parse_block_contents(sheet, id, true)?;
                    self.expect(Token::BraceClose)?;
                }
            }
            // `}` or EOF ends a statement at-rule missing its semicolon.
            _ => {
                let at_rule = AtRule::new(name, prelude, AtRuleBody::Statement);
                sheet.append(container, NodeKind::AtRule(at_rule));
            }
        }
        Ok(())
    }

    /// Capture everything up to the matching `}` byte-for-byte, consuming the `}`.
    fn parse_raw_block(&mut self) -> Result<String, ParseError> {
        let source = self.source;
        let start = self.peek().map_or(source.len(), |l| l.span.start);
        let mut depth = 0usize;

        while let Some(lexeme) = self.advance() {
            match lexeme.token {
                Token::BraceOpen => depth += 1,
                Token::BraceClose if depth == 0 => {
                    let end = lexeme.span.start;
                    return Ok(source[start..end].to_string());
                }
                Token::BraceClose => depth -= 1,
                _ => {}
            }
        }

        Err(ParseError::UnexpectedEof("expected '}' closing raw block".into()))
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek_token() {
                None => return Err(ParseError::UnexpectedEof("expected '}'".into())),
                Some(Token::BraceClose) => return Ok(declarations),
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }
    }

    /// Parse a single declaration: `property: value [!important];`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let source = self.source;
        let start = self.cursor;
        let mut depth = 0usize;
        let mut colon = None;

        while let Some(lexeme) = self.peek() {
            match lexeme.token {
                Token::Semicolon | Token::BraceClose if depth == 0 => break,
                Token::BraceOpen if depth == 0 => {
                    return Err(ParseError::UnexpectedToken {
                        offset: lexeme.span.start,
                        found: "'{'".into(),
                        message: "nested blocks inside declarations are not supported".into(),
                    });
                }
                Token::ParenOpen | Token::BracketOpen | Token::BraceOpen => depth += 1,
                Token::ParenClose | Token::BracketClose | Token::BraceClose => {
                    depth = depth.saturating_sub(1);
                }
                Token::Colon if depth == 0 && colon.is_none() => colon = Some(self.cursor),
                _ => {}
            }
            self.cursor += 1;
        }
        let end = self.cursor;

        let Some(colon) = colon else {
            let offset = self.tokens[start].span.start;
            return Err(ParseError::UnexpectedToken {
                offset,
                found: format!("'{}'", self.tokens[start].text(source)),
                message: "expected ':' in declaration".into(),
            });
        };

        let property = collapse_whitespace(&join_tokens(source, &self.tokens[start..colon]));

        // `!important` counts only as the last meaningful token.
        let mut value_end = end;
        while value_end > colon + 1 && self.tokens[value_end - 1].is_trivia() {
            value_end -= 1;
        }
        let important =
            value_end > colon + 1 && self.tokens[value_end - 1].token == Token::Important;
        if important {
            value_end -= 1;
        }
        let value = join_tokens(source, &self.tokens[colon + 1..value_end]).trim().to_string();

        if self.peek_token() == Some(Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration {
            property,
            value,
            important,
        })
    }
}

/// Concatenate token texts, dropping comments.
fn join_tokens(source: &str, tokens: &[Lexeme]) -> String {
    tokens
        .iter()
        .filter(|l| l.token != Token::Comment)
        .map(|l| l.text(source))
        .collect()
}

/// Collapse whitespace runs to one space and trim, leaving quoted strings intact.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote = None;
    let mut pending_space = false;

    for ch in text.chars() {
        match quote {
            Some(q) => {
                out.push(ch);
                if ch == q {
                    quote = None;
                }
            }
            None if ch.is_whitespace() => pending_space = true,
            None => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                }
                out.push(ch);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(sheet: &Stylesheet) -> Vec<Rule> {
        sheet
            .walk_rules()
            .into_iter()
            .filter_map(|(_, id)| sheet.rule(id).cloned())
            .collect()
    }

    fn first_rule(input: &str) -> Rule {
        let sheet = parse_css(input).unwrap();
        rules(&sheet).remove(0)
    }

    #[test]
    fn empty_stylesheet() {
        let sheet = parse_css("").unwrap();
        assert!(sheet.is_empty());
    }

    #[test]
    fn simple_rule() {
        let rule = first_rule(".button { padding-inline-start: 1rem; }");
        assert_eq!(rule.selectors, vec![".button"]);
        assert_eq!(
            rule.declarations,
            vec![Declaration::new("padding-inline-start", "1rem", false)]
        );
    }

    #[test]
    fn selector_list_and_whitespace() {
        let rule = first_rule(".a,\n  .b   >   .c , [dir=\"rtl\"]  .d { color: red }");
        assert_eq!(rule.selectors, vec![".a", ".b > .c", "[dir=\"rtl\"] .d"]);
    }

    #[test]
    fn commas_inside_functions_do_not_split_selectors() {
        let rule = first_rule(":is(.a, .b) .c, .d { color: red }");
        assert_eq!(rule.selectors, vec![":is(.a, .b) .c", ".d"]);
    }

    #[test]
    fn important_flag() {
        let rule = first_rule(".a { margin: 0 !important; color: red ! IMPORTANT }");
        assert_eq!(rule.declarations[0], Declaration::new("margin", "0", true));
        assert_eq!(rule.declarations[1], Declaration::new("color", "red", true));
    }

    #[test]
    fn value_with_functions_and_semicolons_in_strings() {
        let rule = first_rule(
            ".a { background: linear-gradient(to inline-end, red, blue); content: \"a;b\"; }",
        );
        assert_eq!(
            rule.declarations[0].value,
            "linear-gradient(to inline-end, red, blue)"
        );
        assert_eq!(rule.declarations[1].value, "\"a;b\"");
    }

    #[test]
    fn custom_property_kept_verbatim() {
        let rule = first_rule(".a { --margin-inline: 1px 2px; }");
        assert_eq!(rule.declarations[0].property, "--margin-inline");
        assert_eq!(rule.declarations[0].value, "1px 2px");
    }

    #[test]
    fn comments_are_dropped() {
        let rule = first_rule("/* head */ .a /* x */ { color: /* y */ red; }");
        assert_eq!(rule.selectors, vec![".a"]);
        assert_eq!(rule.declarations[0].value, "red");
    }

    #[test]
    fn nested_media() {
        let sheet = parse_css("@media (min-width: 40em) { .a { color: red; } }").unwrap();
        let root_children = sheet.children(sheet.root());
        assert_eq!(root_children.len(), 1);
        match sheet.get(root_children[0]) {
            Some(NodeKind::AtRule(at)) => {
                assert_eq!(at.name, "media");
                assert_eq!(at.prelude, "(min-width: 40em)");
                assert_eq!(at.body, AtRuleBody::Rules);
            }
            other => panic!("expected at-rule, got {other:?}"),
        }
        assert_eq!(rules(&sheet).len(), 1);
    }

    #[test]
    fn keyframes_body_is_raw() {
        let input = "@keyframes spin {\n  from { margin-inline-start: 0; }\n  \
                     to { margin-inline-start: 10px; }\n}";
        let sheet = parse_css(input).unwrap();
        let id = sheet.children(sheet.root())[0];
        match sheet.get(id) {
            Some(NodeKind::AtRule(at)) => assert_eq!(
                at.body,
                AtRuleBody::Raw(
                    "\n  from { margin-inline-start: 0; }\n  to { margin-inline-start: 10px; }\n"
                        .into()
                )
            ),
            other => panic!("expected keyframes, got {other:?}"),
        }
        assert!(rules(&sheet).is_empty());
    }

    #[test]
    fn font_face_holds_declarations() {
        let sheet = parse_css("@font-face { font-family: X; src: url(x.woff2); }").unwrap();
        let id = sheet.children(sheet.root())[0];
        match sheet.get(id) {
            Some(NodeKind::AtRule(at)) => match &at.body {
                AtRuleBody::Declarations(decls) => assert_eq!(decls.len(), 2),
                other => panic!("expected declarations, got {other:?}"),
            },
            other => panic!("expected at-rule, got {other:?}"),
        }
    }

    #[test]
    fn statement_at_rules() {
        let sheet =
            parse_css("@charset \"utf-8\";\n@import url(a.css) screen;\n.a{color:red}").unwrap();
        let children = sheet.children(sheet.root());
        assert_eq!(children.len(), 3);
        match sheet.get(children[1]) {
            Some(NodeKind::AtRule(at)) => {
                assert_eq!(at.name, "import");
                assert_eq!(at.prelude, "url(a.css) screen");
                assert_eq!(at.body, AtRuleBody::Statement);
            }
            other => panic!("expected import, got {other:?}"),
        }
    }

    #[test]
    fn unbalanced_braces_error() {
        assert!(matches!(
            parse_css(".a { color: red;"),
            Err(ParseError::UnexpectedEof(_))
        ));
        assert!(matches!(
            parse_css(".a { color: red; } }"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn unterminated_string_error() {
        assert!(matches!(
            parse_css(".a { content: \"oops; }"),
            Err(ParseError::UnterminatedString(_))
        ));
    }

    #[test]
    fn unterminated_comment_error() {
        assert!(matches!(
            parse_css(".a { color: red; } /* trailing"),
            Err(ParseError::UnterminatedComment(_))
        ));
    }

    #[test]
    fn declaration_without_colon_error() {
        assert!(matches!(
            parse_css(".a { color red; }"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn collapse_whitespace_keeps_strings() {
        assert_eq!(collapse_whitespace("  a   [x=\"1  2\"]  "), "a [x=\"1  2\"]");
    }
}
