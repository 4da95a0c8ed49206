//! The Loam tokeniser.
//!
//! A [`Tokeniser`] owns a byte [`Source`] and turns it into a stream of
//! [`Token`]s on demand: [`next`](Tokeniser::next) advances to and
//! returns the next token, and [`token`](Tokeniser::token) re-exposes it
//! until the next advance. The lexer keeps exactly one code point of
//! lookahead and tracks a zero-based (line, character) position; each
//! token carries the half-open span `[begin, end)` it was read from,
//! where `begin` is the position the previous token ended at.
//!
//! Malformed input never aborts the stream. Bad UTF-8 and malformed
//! literals produce `Invalid` tokens, end of input inside a block comment
//! produces the partial comment, and once the source is exhausted `next`
//! returns an `Eof` token forever. Every call consumes at least one code
//! point until then, so a pathological input cannot stall the parser.

mod recognisers;
mod token;

use recognisers::{
    is_alpha, is_alpha_num, is_begin_bin, is_begin_hex, is_begin_oct, is_bin, is_digit,
    is_double_quote, is_equals, is_hex, is_new_line, is_normal_alpha, is_oct, is_single_quote,
    is_underscore,
};
pub use token::{Position, Span, Token, TokenKind};

use crate::{
    error::SourceError,
    source::{FileSource, MemorySource, Source},
    utf8::{Char, Text},
};

/// A single-pass, position-tracked lexer over a byte source.
pub struct Tokeniser<S: Source> {
    source: S,
    current: Char,
    position: Position,
    token: Token,
}

impl<S: Source> Tokeniser<S> {
    /// Wraps `source` and primes the one-code-point lookahead.
    pub fn new(source: S) -> Self {
        let mut tokeniser = Self {
            source,
            current: Char::default(),
            position: Position::default(),
            token: Token::default(),
        };
        tokeniser.token.ends_at(tokeniser.position);
        tokeniser.next_char();
        tokeniser
    }

    /// The most recently read token.
    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Advances to and returns the next token.
    ///
    /// Once the source is exhausted this keeps returning an `Eof` token.
    pub fn next(&mut self) -> &Token {
        if self.source.at_end() {
            self.token.set(TokenKind::Eof, Text::new());
            return &self.token;
        }
        self.token.reset();
        self.read_token();
        &self.token
    }

    /// Consumes the lookahead, reads its replacement and returns the
    /// consumed code point.
    ///
    /// The position is accounted eagerly: it always covers every code
    /// point read so far, including the fresh lookahead. A carriage
    /// return or a lone line feed advances the line; the line feed of a
    /// CR LF pair is swallowed so the pair counts as one line break.
    fn next_char(&mut self) -> Char {
        let value = self.current;
        if self.source.at_end() {
            self.current = Char::default();
            return value;
        }

        self.current = Char::read_from(&mut self.source);
        if is_new_line(self.current) {
            if (value != '\r' && self.current == '\n') || self.current == '\r' {
                self.position.line += 1;
                self.position.character = 0;
            }
        } else {
            self.position.character += 1;
        }
        value
    }

    /// Stamps the token's end with the current position.
    fn mark_end(&mut self) {
        self.token.ends_at(self.position);
    }

    /// Reclassifies the token and stamps its end in one step.
    fn finalise(&mut self, kind: TokenKind, value: Text) {
        self.token.set(kind, value);
        self.mark_end();
    }

    fn read_token(&mut self) {
        let Some(chr) = self.current.to_char() else {
            // Malformed UTF-8 in the lookahead.
            return self.read_extended();
        };
        match chr {
            ' ' | '\t' => self.token.set_kind(TokenKind::Whitespace),
            '#' => return self.read_line_comment(),
            '\r' | '\n' => self.token.set_kind(TokenKind::Newline),
            '.' => self.read_ellipsis(),
            ';' => self.token.set_kind(TokenKind::Semi),
            '{' => self.token.set_kind(TokenKind::LeftBrace),
            '}' => self.token.set_kind(TokenKind::RightBrace),
            '(' => self.token.set_kind(TokenKind::LeftParen),
            ')' => self.token.set_kind(TokenKind::RightParen),
            '[' => self.token.set_kind(TokenKind::LeftSquare),
            ']' => self.token.set_kind(TokenKind::RightSquare),
            ',' => self.token.set_kind(TokenKind::Comma),
            ':' => self.token.set_kind(TokenKind::Colon),
            '"' => self.read_string(),
            '\'' => self.read_char_literal(),
            '~' => self.token.set_kind(TokenKind::Invert),
            '/' => return self.read_div(),
            '*' | '%' => return self.read_mul(),
            '+' | '-' => return self.read_add(),
            '&' | '|' => return self.read_boolean(),
            '^' => return self.read_bitwise(),
            '<' | '>' => return self.read_relation(),
            '!' | '=' => return self.read_equality(),
            _ => return self.read_extended(),
        }
        self.mark_end();
        self.next_char();
    }

    /// Identifier, keyword, numeric literal, or a lone invalid code
    /// point.
    fn read_extended(&mut self) {
        self.token.set_kind(TokenKind::Ident);
        if is_alpha(self.current) || is_underscore(self.current) {
            let ident = self.read_alpha_num();
            self.classify_ident(ident);
        } else if is_digit(self.current) {
            self.read_int();
        } else {
            self.token.set_kind(TokenKind::Invalid);
            self.mark_end();
            self.next_char();
        }
    }

    /// Greedily consumes alphanumerics and underscores.
    fn read_alpha_num(&mut self) -> Text {
        let mut token = Text::new();
        while is_alpha_num(self.current) || is_underscore(self.current) {
            self.mark_end();
            token.push(self.next_char());
        }
        token
    }

    fn classify_ident(&mut self, ident: Text) {
        match ident.as_str() {
            "true" | "false" => self.token.set_kind(TokenKind::BoolLit),
            "nullptr" => self.token.set_kind(TokenKind::NullptrLit),
            "and" => self
                .token
                .set(TokenKind::LogicOp, Text::from_char(Char::from('&'))),
            "or" => self
                .token
                .set(TokenKind::LogicOp, Text::from_char(Char::from('|'))),
            "not" => self
                .token
                .set(TokenKind::LogicOp, Text::from_char(Char::from('!'))),
            "eeprom" | "flash" | "rom" => self.token.set_kind(TokenKind::LocationSpec),
            "const" | "static" | "volatile" => self.token.set_kind(TokenKind::StorageSpec),
            "new" => self.token.set_kind(TokenKind::NewStmt),
            "delete" => self.token.set_kind(TokenKind::DeleteStmt),
            "from" => self.token.set_kind(TokenKind::FromStmt),
            "import" => self.token.set_kind(TokenKind::ImportStmt),
            "as" => self.token.set_kind(TokenKind::AsStmt),
            "return" => self.token.set_kind(TokenKind::ReturnStmt),
            "if" => self.token.set_kind(TokenKind::IfStmt),
            "elif" => self.token.set_kind(TokenKind::ElifStmt),
            "else" => self.token.set_kind(TokenKind::ElseStmt),
            "for" => self.token.set_kind(TokenKind::ForStmt),
            "while" => self.token.set_kind(TokenKind::WhileStmt),
            "do" => self.token.set_kind(TokenKind::DoStmt),
            "none" => self.token.set_kind(TokenKind::NoneType),
            "class" => self.token.set_kind(TokenKind::ClassDef),
            "enum" => self.token.set_kind(TokenKind::EnumDef),
            "function" => self.token.set_kind(TokenKind::FunctionDef),
            "operator" => self.token.set_kind(TokenKind::OperatorDef),
            "public" | "private" | "protected" => self.token.set_kind(TokenKind::Visibility),
            "unsafe" => self.token.set_kind(TokenKind::Unsafe),
            _ => {}
        }
        // Word operators replace the value; everything else keeps the
        // identifier text.
        if self.token.value().is_empty() {
            self.token.set_value(ident);
        }
    }

    /// Line comment: everything up to, but not including, the newline.
    fn read_line_comment(&mut self) {
        self.token.set_kind(TokenKind::Comment);
        let mut comment = Text::new();
        while !self.source.at_end() && !is_new_line(self.current) {
            self.mark_end();
            comment.push(self.next_char());
        }
        self.token.set(TokenKind::Comment, comment);
    }

    /// Block comment body, entered just past the opening `/*`. Ends at
    /// the first `*/`; end of input first leaves the partial comment.
    fn read_block_comment(&mut self) {
        self.token.set_kind(TokenKind::Comment);
        let mut found_end = false;
        let mut comment = Text::new();
        while !found_end && !self.source.at_end() {
            if self.current == '*' {
                self.mark_end();
                let star = self.next_char();
                if self.current == '/' {
                    self.mark_end();
                    self.next_char();
                    found_end = true;
                } else {
                    comment.push(star);
                }
            } else {
                self.mark_end();
                comment.push(self.next_char());
            }
        }
        self.token.set(TokenKind::Comment, comment);
    }

    /// `.` might start `...`: remember where we were, look two code
    /// points ahead, and rewind if the ellipsis fails to materialise.
    fn read_ellipsis(&mut self) {
        self.token.set_kind(TokenKind::Dot);
        let saved_position = self.position;
        let offset = self.source.tell();
        self.next_char();
        if self.next_char() == '.' && self.current == '.' {
            self.token.set_kind(TokenKind::Ellipsis);
        } else {
            if !self.source.seek_to(offset) {
                // Without the rewind the two lookahead code points are
                // lost; nothing downstream can trust spans after this.
                log::error!("source seek failed, tokenisation will now be unreliable");
            }
            self.position = saved_position;
        }
    }

    /// Binary-literal body after `0b`/`0B`.
    fn read_bin(&mut self) {
        let mut literal = Text::new();
        self.token.set_kind(TokenKind::BinLit);
        self.mark_end();
        self.next_char();
        while is_bin(self.current) {
            self.mark_end();
            literal.push(self.next_char());
        }
        if literal.is_empty() {
            self.token.set_kind(TokenKind::Invalid);
        } else {
            self.token.set_value(literal);
        }
    }

    /// Octal-literal body after `0c`/`0C`.
    fn read_oct(&mut self) {
        let mut literal = Text::new();
        self.token.set_kind(TokenKind::OctLit);
        self.mark_end();
        self.next_char();
        while is_oct(self.current) {
            self.mark_end();
            literal.push(self.next_char());
        }
        if literal.is_empty() {
            self.token.set_kind(TokenKind::Invalid);
        } else {
            self.token.set_value(literal);
        }
    }

    /// Hex-literal body after `0x`/`0X`; also borrowed by `\u` escapes.
    fn read_hex(&mut self) {
        let mut literal = Text::new();
        self.token.set_kind(TokenKind::HexLit);
        self.mark_end();
        self.next_char();
        while is_hex(self.current) {
            self.mark_end();
            literal.push(self.next_char());
        }
        if literal.is_empty() {
            self.token.set_kind(TokenKind::Invalid);
        } else {
            self.token.set_value(literal);
        }
    }

    /// Integer literal. A leading zero opens prefix recognition; `07` and
    /// friends stay decimal rather than being reinterpreted.
    fn read_int(&mut self) {
        let mut literal = Text::new();
        let first_digit = self.current;
        self.token.set_kind(TokenKind::IntLit);
        self.mark_end();
        if first_digit == '0' {
            self.next_char();
            if is_begin_bin(self.current) {
                return self.read_bin();
            }
            if is_begin_oct(self.current) {
                return self.read_oct();
            }
            if is_begin_hex(self.current) {
                return self.read_hex();
            }
            literal.push(first_digit);
        }
        while is_digit(self.current) {
            self.mark_end();
            literal.push(self.next_char());
        }
        self.token.set(TokenKind::IntLit, literal);
    }

    /// One code point of a quoted literal body.
    ///
    /// `normal_quote` is the *other* quote character, allowed bare;
    /// `escaped_quote` is this literal's own delimiter, reachable through
    /// a backslash. `\u`/`\U` reads a hexadecimal literal inline and
    /// restores the surrounding token state afterwards. Anything
    /// unrecognised comes back invalid.
    fn read_unicode(&mut self, normal_quote: Char, escaped_quote: Char) -> Char {
        let mut result = Char::default();
        if is_normal_alpha(self.current) || self.current == normal_quote {
            result = self.current;
        } else if self.current == '\\' {
            self.next_char();
            match self.current.to_char() {
                Some('\\') => result = self.current,
                Some('b') => result = Char::from_scalar(8),
                Some('r') => result = Char::from_scalar(13),
                Some('n') => result = Char::from_scalar(10),
                Some('t') => result = Char::from_scalar(9),
                Some('v') => result = Char::from_scalar(11),
                Some('f') => result = Char::from_scalar(12),
                Some('a') => result = Char::from_scalar(7),
                Some('u' | 'U') => {
                    let kind = self.token.kind();
                    self.read_hex();
                    // The hex reader only ever accumulates ASCII digits,
                    // so parsing its value as a number is safe.
                    result = u32::from_str_radix(self.token.value().as_str(), 16)
                        .map_or_else(|_| Char::default(), Char::from_scalar);
                    self.token.set(kind, Text::new());
                    return result;
                }
                _ => {}
            }
            if self.current == escaped_quote {
                result = escaped_quote;
            }
        }
        self.next_char();
        result
    }

    /// String literal body up to the closing `"`.
    fn read_string(&mut self) {
        self.token.set_kind(TokenKind::StringLit);
        self.next_char();
        let mut literal = Text::new();
        while !is_double_quote(self.current) {
            let value = self.read_unicode(Char::from('\''), Char::from('"'));
            if !value.valid() {
                self.token.set_kind(TokenKind::Invalid);
                return;
            }
            literal.push(value);
        }
        self.token.set_value(literal);
    }

    /// Character literal: exactly one body code point, then the closing
    /// quote. Empty and unterminated forms are invalid.
    fn read_char_literal(&mut self) {
        self.token.set_kind(TokenKind::CharLit);
        self.next_char();
        if is_single_quote(self.current) {
            self.token.set_kind(TokenKind::Invalid);
            return;
        }
        let literal = self.read_unicode(Char::from('"'), Char::from('\''));
        if !literal.valid() || !is_single_quote(self.current) {
            self.token.set_kind(TokenKind::Invalid);
            return;
        }
        self.token.set_value(Text::from_char(literal));
    }

    /// `/` is division, `/=`, or the opening of either comment form.
    fn read_div(&mut self) {
        self.finalise(TokenKind::MulOp, Text::from_char(self.current));
        let mut token = Text::from_char(self.next_char());
        if is_equals(self.current) {
            token.push(self.current);
            self.finalise(TokenKind::AssignOp, token);
            self.next_char();
        } else if self.current == '*' {
            self.mark_end();
            self.next_char();
            self.read_block_comment();
        } else if self.current == '/' {
            self.mark_end();
            self.next_char();
            self.read_line_comment();
        }
    }

    /// `*` and `%`, with an optional `=` suffix.
    fn read_mul(&mut self) {
        self.finalise(TokenKind::MulOp, Text::from_char(self.current));
        let mut token = Text::from_char(self.next_char());
        if is_equals(self.current) {
            token.push(self.current);
            self.finalise(TokenKind::AssignOp, token);
            self.next_char();
        }
    }

    /// `+` and `-`: compound assignment, arrow, increment pair, or the
    /// plain additive operator.
    fn read_add(&mut self) {
        self.finalise(TokenKind::AddOp, Text::from_char(self.current));
        let token = self.next_char();
        if is_equals(self.current) {
            self.finalise(TokenKind::AssignOp, Text::from_chars([token, self.current]));
        } else if token == '-' && self.current == '>' {
            self.finalise(TokenKind::Arrow, Text::new());
        } else if self.current == token {
            self.finalise(TokenKind::IncOp, Text::from_char(token));
        } else {
            return;
        }
        self.next_char();
    }

    /// `&` and `|`: compound assignment, doubled logic operator, or the
    /// single bitwise operator.
    fn read_boolean(&mut self) {
        self.finalise(TokenKind::BitOp, Text::from_char(self.current));
        let token = self.next_char();
        if is_equals(self.current) {
            self.finalise(TokenKind::AssignOp, Text::from_chars([token, self.current]));
        } else if self.current == token {
            self.finalise(TokenKind::LogicOp, Text::from_char(token));
        } else {
            return;
        }
        self.next_char();
    }

    /// `^`, with an optional `=` suffix.
    fn read_bitwise(&mut self) {
        self.finalise(TokenKind::BitOp, Text::from_char(self.current));
        let token = self.next_char();
        if is_equals(self.current) {
            self.finalise(TokenKind::AssignOp, Text::from_chars([token, self.current]));
            self.next_char();
        }
    }

    /// `<` and `>`: relation, compound assignment, shift, or shift
    /// assignment. The token is finalised before each attempted
    /// extension, so the longest match wins.
    fn read_relation(&mut self) {
        self.finalise(TokenKind::RelOp, Text::from_char(self.current));
        let token = self.next_char();
        if is_equals(self.current) {
            self.finalise(TokenKind::AssignOp, Text::from_chars([token, self.current]));
        } else if self.current == token {
            self.finalise(TokenKind::ShiftOp, Text::from_chars([token, token]));
            self.next_char();
            if is_equals(self.current) {
                self.finalise(
                    TokenKind::AssignOp,
                    Text::from_chars([token, token, self.current]),
                );
            } else {
                return;
            }
        } else {
            return;
        }
        self.next_char();
    }

    /// `!` and `=`: equality comparison, bare assignment, or logical
    /// inversion.
    fn read_equality(&mut self) {
        self.mark_end();
        let token = self.next_char();
        if is_equals(self.current) {
            self.finalise(TokenKind::EquOp, Text::from_chars([token, self.current]));
            self.next_char();
        } else if is_equals(token) {
            self.token.set(TokenKind::AssignOp, Text::from_char(token));
        } else {
            self.token.set(TokenKind::Invert, Text::from_char(token));
        }
    }
}

impl Tokeniser<FileSource> {
    /// Opens the file at `path` through a buffered stream.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the file cannot be opened.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SourceError> {
        Ok(Self::new(FileSource::open(path)?))
    }
}

#[cfg(feature = "mmap")]
impl Tokeniser<MemorySource<memmap2::Mmap>> {
    /// Maps the file at `path` read-only and tokenises the mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the file cannot be opened or
    /// mapped.
    pub fn map_path(path: impl AsRef<std::path::Path>) -> Result<Self, SourceError> {
        Ok(Self::new(MemorySource::map_path(path)?))
    }
}

impl<B: AsRef<[u8]>> Tokeniser<MemorySource<B>> {
    /// Tokenises an in-memory buffer.
    pub fn from_bytes(data: B) -> Self {
        Self::new(MemorySource::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, TokenKind, Tokeniser};

    fn lex(input: &str) -> Tokeniser<crate::source::MemorySource<&[u8]>> {
        Tokeniser::from_bytes(input.as_bytes())
    }

    #[test]
    fn starts_invalid_until_first_advance() {
        let mut tokeniser = lex("a");
        assert!(!tokeniser.token().valid());
        tokeniser.next();
        assert_eq!(tokeniser.token().kind(), TokenKind::Ident);
        assert_eq!(tokeniser.token().value(), "a");
    }

    #[test]
    fn token_is_stable_between_advances() {
        let mut tokeniser = lex("abc def");
        tokeniser.next();
        assert_eq!(tokeniser.token().value(), "abc");
        assert_eq!(tokeniser.token().value(), "abc");
        tokeniser.next();
        assert_eq!(tokeniser.token().kind(), TokenKind::Whitespace);
    }

    #[test]
    fn eof_repeats_forever() {
        let mut tokeniser = lex("x");
        assert_eq!(tokeniser.next().kind(), TokenKind::Ident);
        for _ in 0..4 {
            assert_eq!(tokeniser.next().kind(), TokenKind::Eof);
        }
    }

    #[test]
    fn empty_input_is_immediately_eof() {
        let mut tokeniser = lex("");
        assert_eq!(tokeniser.next().kind(), TokenKind::Eof);
    }

    #[test]
    fn spans_tile_the_line() {
        let mut tokeniser = lex("ab + 10");
        let expected = [
            (TokenKind::Ident, 0_usize, 2_usize),
            (TokenKind::Whitespace, 2, 3),
            (TokenKind::AddOp, 3, 4),
            (TokenKind::Whitespace, 4, 5),
            (TokenKind::IntLit, 5, 7),
        ];
        for (kind, begin, end) in expected {
            let token = tokeniser.next();
            assert_eq!(token.kind(), kind);
            let location = token.location();
            assert_eq!(location.begin, Position { line: 0, character: begin });
            assert_eq!(location.end, Position { line: 0, character: end });
        }
        assert_eq!(tokeniser.next().kind(), TokenKind::Eof);
    }

    #[test]
    fn crlf_counts_as_one_line_break() {
        let mut tokeniser = lex("a\r\nb");
        assert_eq!(tokeniser.next().kind(), TokenKind::Ident);
        assert_eq!(tokeniser.next().kind(), TokenKind::Newline);
        assert_eq!(tokeniser.next().kind(), TokenKind::Newline);
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::Ident);
        assert_eq!(token.location().begin, Position { line: 1, character: 0 });
        assert_eq!(token.location().end, Position { line: 1, character: 1 });
    }

    #[test]
    fn lone_cr_and_lf_both_advance_the_line() {
        let mut tokeniser = lex("a\rb\nc");
        tokeniser.next();
        tokeniser.next();
        let b = tokeniser.next();
        assert_eq!(b.location().begin.line, 1);
        tokeniser.next();
        let c = tokeniser.next();
        assert_eq!(c.location().begin.line, 2);
    }

    #[test]
    fn ellipsis_rewind_restores_position() {
        let mut tokeniser = lex("..");
        let first = tokeniser.next();
        assert_eq!(first.kind(), TokenKind::Dot);
        assert_eq!(first.location().end, Position { line: 0, character: 1 });
        let second = tokeniser.next();
        assert_eq!(second.kind(), TokenKind::Dot);
        assert_eq!(second.location().begin, Position { line: 0, character: 1 });
        assert_eq!(second.location().end, Position { line: 0, character: 2 });
        assert_eq!(tokeniser.next().kind(), TokenKind::Eof);
    }

    #[test]
    fn malformed_utf8_is_an_invalid_token() {
        let mut tokeniser = Tokeniser::from_bytes([0xff, b'a'].as_slice());
        assert_eq!(tokeniser.next().kind(), TokenKind::Invalid);
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::Ident);
        assert_eq!(token.value(), "a");
    }

    #[test]
    fn unicode_identifiers_count_code_points() {
        let mut tokeniser = lex("héllo = 1");
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::Ident);
        assert_eq!(token.value(), "héllo");
        assert_eq!(token.location().end, Position { line: 0, character: 5 });
    }

    #[test]
    fn block_comment_hits_end_of_input() {
        let mut tokeniser = lex("/* dangling");
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::Comment);
        assert_eq!(token.value(), " dangling");
        assert_eq!(tokeniser.next().kind(), TokenKind::Eof);
    }

    #[test]
    fn escapes_decode_in_string_bodies() {
        let mut tokeniser = lex(r#""a\tbAc\\""#);
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::StringLit);
        assert_eq!(token.value(), "a\tbAc\\");
    }

    #[test]
    fn escaped_quote_forms() {
        let mut tokeniser = lex(r#""say \"hi\"""#);
        assert_eq!(tokeniser.next().value(), "say \"hi\"");

        let mut tokeniser = lex(r"'\''");
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::CharLit);
        assert_eq!(token.value(), "'");
    }

    #[test]
    fn char_literal_requires_one_code_point() {
        let mut tokeniser = lex("''");
        assert_eq!(tokeniser.next().kind(), TokenKind::Invalid);

        let mut tokeniser = lex("'ab'");
        assert_eq!(tokeniser.next().kind(), TokenKind::Invalid);

        let mut tokeniser = lex("'q'");
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::CharLit);
        assert_eq!(token.value(), "q");

        let mut tokeniser = lex(r"'…'");
        let token = tokeniser.next();
        assert_eq!(token.kind(), TokenKind::CharLit);
        assert_eq!(token.value(), "…");
    }

    #[test]
    fn bad_escape_is_invalid() {
        let mut tokeniser = lex(r#""a\qb""#);
        assert_eq!(tokeniser.next().kind(), TokenKind::Invalid);
    }
}
