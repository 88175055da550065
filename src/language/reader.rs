//! Source text to expression trees.
//!
//! Two passes: `tokenize` splits the text into parens and atoms with byte
//! spans, then `AstParser` assembles lists and recognizes the `def` and `if`
//! forms. Syntax errors are collected per top-level form so one bad form does
//! not hide the others.

use crate::language::{
    ast::Expr,
    errors::{SyntaxError, SyntaxErrors},
};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace1, not_line_ending},
    combinator::{all_consuming, map, value},
    multi::many0_count,
    number::complete::recognize_float,
    sequence::preceded,
    IResult,
};
use std::ops::Range;

/// Deepest list nesting `read` accepts. Matches the evaluator's default depth.
pub const MAX_NESTING: usize = 512;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    LeftParen,
    RightParen,
    Number(f64),
    Bool(bool),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexToken {
    pub token: Token,
    pub span: Range<usize>,
}

fn is_atom_char(c: char) -> bool {
    !matches!(c, ' ' | '\t' | '\r' | '\n' | '(' | ')' | ';')
}

fn skip_trivia(input: &str) -> IResult<&str, usize> {
    many0_count(alt((multispace1, preceded(char(';'), not_line_ending))))(input)
}

fn parse_left_paren(input: &str) -> IResult<&str, Token> {
    value(Token::LeftParen, char('('))(input)
}

fn parse_right_paren(input: &str) -> IResult<&str, Token> {
    value(Token::RightParen, char(')'))(input)
}

fn parse_atom(input: &str) -> IResult<&str, Token> {
    map(take_while1(is_atom_char), classify_atom)(input)
}

fn classify_atom(text: &str) -> Token {
    match text {
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        _ if looks_numeric(text) => text
            .parse::<f64>()
            .map(Token::Number)
            .unwrap_or_else(|_| Token::Symbol(text.to_string())),
        _ => Token::Symbol(text.to_string()),
    }
}

// `recognize_float` rejects `inf`/`nan` spellings, which stay symbols.
fn looks_numeric(text: &str) -> bool {
    all_consuming(recognize_float::<&str, nom::error::Error<&str>>)(text).is_ok()
}

pub fn tokenize(source: &str) -> Result<Vec<LexToken>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut remaining = source;
    loop {
        if let Ok((rest, _)) = skip_trivia(remaining) {
            remaining = rest;
        }
        if remaining.is_empty() {
            break;
        }
        let start = source.len() - remaining.len();
        match alt((parse_left_paren, parse_right_paren, parse_atom))(remaining) {
            Ok((rest, token)) => {
                let end = source.len() - rest.len();
                tokens.push(LexToken {
                    token,
                    span: start..end,
                });
                remaining = rest;
            }
            Err(_) => {
                let width = remaining.chars().next().map_or(1, char::len_utf8);
                return Err(SyntaxError::new("unrecognized input", start..start + width));
            }
        }
    }
    Ok(tokens)
}

/// Reads every top-level form in `source`.
pub fn read(source: &str) -> Result<Vec<Expr>, SyntaxErrors> {
    let tokens = tokenize(source).map_err(|err| SyntaxErrors::new(vec![err]))?;
    let mut parser = AstParser::new(&tokens, source.len());
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        Ok(program)
    } else {
        Err(SyntaxErrors::new(parser.errors))
    }
}

struct AstParser<'a> {
    tokens: &'a [LexToken],
    pos: usize,
    eof: usize,
    depth: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> AstParser<'a> {
    fn new(tokens: &'a [LexToken], eof: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            depth: 0,
            errors: Vec::new(),
        }
    }

    fn parse_program(&mut self) -> Vec<Expr> {
        let mut exprs = Vec::new();
        while self.pos < self.tokens.len() {
            let start = self.pos;
            match self.parse_expr() {
                Ok(expr) => exprs.push(expr),
                Err(err) => {
                    self.errors.push(err);
                    self.skip_form(start);
                }
            }
        }
        exprs
    }

    /// Moves past the top-level form beginning at `start`.
    fn skip_form(&mut self, start: usize) {
        self.pos = start;
        let mut depth = 0i32;
        while let Some(tok) = self.tokens.get(self.pos) {
            self.pos += 1;
            match tok.token {
                Token::LeftParen => depth += 1,
                Token::RightParen => depth -= 1,
                _ => {}
            }
            if depth <= 0 {
                break;
            }
        }
    }

    fn peek(&self) -> Option<&'a LexToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a LexToken> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn last_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or(0, |tok| tok.span.end)
    }

    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let Some(tok) = self.advance() else {
            return Err(SyntaxError::new("unexpected end of input", self.eof..self.eof));
        };
        match &tok.token {
            Token::Number(n) => Ok(Expr::atom(*n)),
            Token::Bool(b) => Ok(Expr::atom(*b)),
            Token::Symbol(name) => Ok(Expr::symbol(name.clone())),
            Token::RightParen => Err(SyntaxError::new("unexpected `)`", tok.span.clone())
                .with_label("no matching `(`")
                .with_help("remove it or add an opening `(`")),
            Token::LeftParen => self.parse_list(tok.span.clone()),
        }
    }

    fn parse_list(&mut self, open: Range<usize>) -> Result<Expr, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::new("expression nested too deeply", open)
                .with_label("this list exceeds the nesting limit")
                .with_help(format!("lists may nest at most {MAX_NESTING} levels")));
        }
        self.depth += 1;
        let result = self.parse_list_items(open);
        self.depth -= 1;
        result
    }

    fn parse_list_items(&mut self, open: Range<usize>) -> Result<Expr, SyntaxError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError::new("unclosed `(`", open)
                        .with_label("opened here")
                        .with_help("add a closing `)`"));
                }
                Some(LexToken {
                    token: Token::RightParen,
                    span,
                }) => {
                    self.pos += 1;
                    return build_list(items, open.start..span.end);
                }
                Some(tok) => {
                    let start = tok.span.start;
                    let expr = self.parse_expr()?;
                    items.push((expr, start..self.last_end()));
                }
            }
        }
    }
}

type Spanned = (Expr, Range<usize>);

fn build_list(items: Vec<Spanned>, span: Range<usize>) -> Result<Expr, SyntaxError> {
    let mut items = items.into_iter();
    let Some((head, _)) = items.next() else {
        return Err(SyntaxError::new("empty list cannot be evaluated", span)
            .with_help("put an operator in head position, e.g. `(+ 1 2)`"));
    };
    if matches!(&head, Expr::Symbol(keyword) if keyword == "def") {
        return build_definition(items, span);
    }
    if matches!(&head, Expr::Symbol(keyword) if keyword == "if") {
        return build_conditional(items, span);
    }
    Ok(Expr::call(head, items.map(|(expr, _)| expr).collect()))
}

fn build_definition(
    mut rest: impl Iterator<Item = Spanned>,
    span: Range<usize>,
) -> Result<Expr, SyntaxError> {
    match (rest.next(), rest.next(), rest.next()) {
        (Some((Expr::Symbol(name), _)), Some((value, _)), None) => Ok(Expr::def(name, value)),
        (Some((_, name_span)), Some(_), None) => {
            Err(SyntaxError::new("definition target must be a symbol", name_span)
                .with_help("write `(def name value)`"))
        }
        _ => Err(SyntaxError::new("`def` takes a name and a value", span)
            .with_help("write `(def name value)`")),
    }
}

fn build_conditional(
    mut rest: impl Iterator<Item = Spanned>,
    span: Range<usize>,
) -> Result<Expr, SyntaxError> {
    match (rest.next(), rest.next(), rest.next(), rest.next()) {
        (Some((condition, _)), Some((then_branch, _)), Some((else_branch, _)), None) => {
            Ok(Expr::if_(condition, then_branch, else_branch))
        }
        _ => Err(
            SyntaxError::new("`if` takes a condition and two branches", span)
                .with_help("write `(if condition then else)`"),
        ),
    }
}
