use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;

/// A field statement inside a message, oneof or extend body.
enum FieldDecl {
    Plain(Member),
    /// Proto2 group: a field that also declares a nested message type
    Group(Member, Declaration),
}

/// Parser for protobuf schema files
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let tokens = tokenize(source).map_err(|span| ParseError::lexer_error(span.into()))?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Parse a complete file
    pub fn parse_file(&mut self) -> ParseResult<ProtoFile> {
        let mut file = ProtoFile::new(self.source.len());

        while !self.is_at_end() {
            if self.match_token(Token::Semicolon) {
                continue;
            }

            match self.peek_word() {
                Some("syntax") => {
                    let (value, member) = self.parse_syntax("syntax", MemberKind::Syntax)?;
                    file.syntax = Some(value);
                    file.root.members.push(member);
                }
                Some("edition") => {
                    let (value, member) = self.parse_syntax("edition", MemberKind::Edition)?;
                    file.edition = Some(value);
                    file.root.members.push(member);
                }
                Some("package") => {
                    let member = self.parse_package()?;
                    file.package = Some(member.name.clone());
                    file.root.members.push(member);
                }
                Some("import") => {
                    let member = self.parse_import()?;
                    file.root.members.push(member);
                }
                Some("option") => {
                    let member = self.parse_option_statement()?;
                    file.root.members.push(member);
                }
                Some("message") => {
                    let message = self.parse_message()?;
                    file.root.children.push(message);
                }
                Some("enum") => {
                    let en = self.parse_enum()?;
                    file.root.children.push(en);
                }
                Some("service") => {
                    let service = self.parse_service()?;
                    file.root.children.push(service);
                }
                Some("extend") => {
                    self.parse_extend(&mut file.root)?;
                }
                _ => {
                    return Err(ParseError::invalid_syntax(
                        self.peek_span(),
                        format!(
                            "Expected 'syntax', 'package', 'import', 'option', 'message', 'enum', 'service' or 'extend', found {}",
                            Self::format_token(self.peek())
                        ),
                    ));
                }
            }
        }

        Ok(file)
    }

    /// Parse a `syntax = "...";` or `edition = "...";` statement
    fn parse_syntax(&mut self, keyword: &str, kind: MemberKind) -> ParseResult<(String, Member)> {
        let start = self.peek_span().start;
        self.expect_word(keyword)?;
        self.expect(Token::Equals)?;
        let value = self.expect_string()?;
        self.expect(Token::Semicolon)?;

        let member = Member::new(kind, value.clone(), Span::new(start, self.prev_end()));
        Ok((value, member))
    }

    fn parse_package(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("package")?;
        let name = self.parse_full_ident()?;
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::Package, name, Span::new(start, self.prev_end())))
    }

    fn parse_import(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("import")?;

        if self.check_word("weak") || self.check_word("public") {
            self.advance();
        }

        let path = self.expect_string()?;
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::Import, path, Span::new(start, self.prev_end())))
    }

    /// Parse `option name = constant;`
    fn parse_option_statement(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("option")?;
        let name = self.parse_option_name()?;
        self.expect(Token::Equals)?;
        self.parse_constant()?;
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::Option, name, Span::new(start, self.prev_end())))
    }

    /// Parse an option name such as `java_package`, `(my.ext)` or `(my.ext).field`
    fn parse_option_name(&mut self) -> ParseResult<String> {
        let mut name = self.parse_option_name_part()?;

        while self.match_token(Token::Dot) {
            name.push('.');
            name.push_str(&self.parse_option_name_part()?);
        }

        Ok(name)
    }

    fn parse_option_name_part(&mut self) -> ParseResult<String> {
        if self.match_token(Token::LParen) {
            let mut part = String::from("(");
            if self.match_token(Token::Dot) {
                part.push('.');
            }
            part.push_str(&self.parse_full_ident()?);
            self.expect(Token::RParen)?;
            part.push(')');
            Ok(part)
        } else {
            Ok(self.expect_ident()?.to_string())
        }
    }

    /// Parse a constant: identifier, signed number, string(s) or aggregate `{...}`
    fn parse_constant(&mut self) -> ParseResult<()> {
        match self.peek().map(|(t, _)| t) {
            Some(Token::Minus) | Some(Token::Plus) => {
                self.advance();
                match self.peek().map(|(t, _)| t) {
                    Some(Token::Int(_)) | Some(Token::Float(_)) | Some(Token::Ident(_)) => {
                        self.advance();
                        Ok(())
                    }
                    _ => Err(self.error_here("number")),
                }
            }
            Some(Token::Int(_)) | Some(Token::Float(_)) => {
                self.advance();
                Ok(())
            }
            Some(Token::String(_)) => {
                // Adjacent string literals concatenate
                while matches!(self.peek(), Some((Token::String(_), _))) {
                    self.advance();
                }
                Ok(())
            }
            Some(Token::Ident(_)) => {
                self.parse_full_ident()?;
                Ok(())
            }
            Some(Token::LBrace) => self.skip_aggregate(),
            _ => Err(self.error_here("constant")),
        }
    }

    /// Skip a text-format aggregate value, balancing braces
    fn skip_aggregate(&mut self) -> ParseResult<()> {
        let open = self.expect(Token::LBrace)?;
        let mut depth = 1usize;

        while depth > 0 {
            match self.advance().map(|(t, _)| t.clone()) {
                Some(Token::LBrace) => depth += 1,
                Some(Token::RBrace) => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(ParseError::invalid_syntax(
                        open.into(),
                        "Unclosed aggregate option value",
                    ))
                }
            }
        }

        Ok(())
    }

    /// Parse `[name = value, ...]`
    fn parse_field_options(&mut self) -> ParseResult<()> {
        self.expect(Token::LBracket)?;

        loop {
            self.parse_option_name()?;
            self.expect(Token::Equals)?;
            self.parse_constant()?;

            if !self.match_token(Token::Comma) {
                break;
            }
        }

        self.expect(Token::RBracket)?;
        Ok(())
    }

    /// Parse a message declaration
    fn parse_message(&mut self) -> ParseResult<Declaration> {
        let start = self.peek_span().start;
        self.expect_word("message")?;
        let name = self.expect_ident()?.to_string();
        let open = self.expect(Token::LBrace)?.start;

        let mut message = Declaration::new(DeclKind::Message, name, Span::new(start, start), open, open);
        self.parse_message_body(&mut message)?;

        let close = self.expect(Token::RBrace)?.start;
        message.close = close;
        message.span = Span::new(start, close + 1);
        Ok(message)
    }

    /// Parse message elements up to (not including) the closing brace
    fn parse_message_body(&mut self, message: &mut Declaration) -> ParseResult<()> {
        loop {
            match self.peek().map(|(t, _)| t) {
                None => return Err(self.error_here("'}'")),
                Some(Token::RBrace) => return Ok(()),
                Some(Token::Semicolon) => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            match self.peek_word() {
                Some("message") if self.looks_like_block() => {
                    let nested = self.parse_message()?;
                    message.children.push(nested);
                }
                Some("enum") if self.looks_like_block() => {
                    let nested = self.parse_enum()?;
                    message.children.push(nested);
                }
                Some("extend") if self.looks_like_block() => {
                    self.parse_extend(message)?;
                }
                Some("oneof") if self.looks_like_block() => {
                    self.parse_oneof(message)?;
                }
                Some("option") => {
                    let member = self.parse_option_statement()?;
                    message.members.push(member);
                }
                Some("reserved") if self.looks_like_reserved() => {
                    let member = self.parse_reserved()?;
                    message.members.push(member);
                }
                Some("extensions") if matches!(self.peek_ahead(1), Some(Token::Int(_))) => {
                    let member = self.parse_extensions()?;
                    message.members.push(member);
                }
                Some("map") if matches!(self.peek_ahead(1), Some(Token::LAngle)) => {
                    let member = self.parse_map_field()?;
                    message.members.push(member);
                }
                _ => match self.parse_field()? {
                    FieldDecl::Plain(member) => message.members.push(member),
                    FieldDecl::Group(member, group) => {
                        message.members.push(member);
                        message.children.push(group);
                    }
                },
            }
        }
    }

    /// Parse `[label] type name = number [options];` or a proto2 group
    fn parse_field(&mut self) -> ParseResult<FieldDecl> {
        let start = self.peek_span().start;

        if matches!(self.peek_word(), Some("repeated") | Some("optional") | Some("required"))
            && self.has_label()
        {
            self.advance();
        }

        if self.check_word("group")
            && matches!(self.peek_ahead(1), Some(Token::Ident(_)))
            && matches!(self.peek_ahead(2), Some(Token::Equals))
        {
            return self.parse_group(start);
        }

        if !matches!(self.peek().map(|(t, _)| t), Some(Token::Ident(_)) | Some(Token::Dot)) {
            return Err(self.error_here("field, 'message', 'enum', 'oneof', 'option' or '}'"));
        }

        self.parse_type_name()?;
        let name = self.expect_ident()?.to_string();
        self.expect(Token::Equals)?;
        self.expect_int()?;

        if self.check(&Token::LBracket) {
            self.parse_field_options()?;
        }
        self.expect(Token::Semicolon)?;

        Ok(FieldDecl::Plain(Member::new(
            MemberKind::Field,
            name,
            Span::new(start, self.prev_end()),
        )))
    }

    /// Parse `group Name = number [options] { ... }` after any label
    fn parse_group(&mut self, start: usize) -> ParseResult<FieldDecl> {
        self.expect_word("group")?;
        let name = self.expect_ident()?.to_string();
        self.expect(Token::Equals)?;
        self.expect_int()?;

        if self.check(&Token::LBracket) {
            self.parse_field_options()?;
        }

        let open = self.expect(Token::LBrace)?.start;
        let mut group = Declaration::new(DeclKind::Message, name.clone(), Span::new(start, start), open, open);
        self.parse_message_body(&mut group)?;

        let close = self.expect(Token::RBrace)?.start;
        group.close = close;
        group.span = Span::new(start, close + 1);

        let field = Member::new(MemberKind::Field, name.to_lowercase(), group.span);
        Ok(FieldDecl::Group(field, group))
    }

    /// Parse `map<key, value> name = number [options];`
    fn parse_map_field(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("map")?;
        self.expect(Token::LAngle)?;
        self.expect_ident()?;
        self.expect(Token::Comma)?;
        self.parse_type_name()?;
        self.expect(Token::RAngle)?;

        let name = self.expect_ident()?.to_string();
        self.expect(Token::Equals)?;
        self.expect_int()?;

        if self.check(&Token::LBracket) {
            self.parse_field_options()?;
        }
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::MapField, name, Span::new(start, self.prev_end())))
    }

    /// Parse a oneof; its fields belong to the enclosing message
    fn parse_oneof(&mut self, message: &mut Declaration) -> ParseResult<()> {
        let start = self.peek_span().start;
        self.expect_word("oneof")?;
        let name = self.expect_ident()?.to_string();
        self.expect(Token::LBrace)?;

        while !self.check(&Token::RBrace) {
            if self.is_at_end() {
                return Err(self.error_here("'}'"));
            }
            if self.match_token(Token::Semicolon) {
                continue;
            }

            if self.check_word("option") {
                self.parse_option_statement()?;
                continue;
            }

            match self.parse_field()? {
                FieldDecl::Plain(member) => message.members.push(member),
                FieldDecl::Group(member, group) => {
                    message.members.push(member);
                    message.children.push(group);
                }
            }
        }

        self.expect(Token::RBrace)?;
        message
            .members
            .push(Member::new(MemberKind::Oneof, name, Span::new(start, self.prev_end())));
        Ok(())
    }

    /// Parse `extend Type { fields }`; groups declare types in the enclosing scope
    fn parse_extend(&mut self, scope: &mut Declaration) -> ParseResult<()> {
        let start = self.peek_span().start;
        self.expect_word("extend")?;
        let extendee = self.parse_type_name()?;
        self.expect(Token::LBrace)?;

        while !self.check(&Token::RBrace) {
            if self.is_at_end() {
                return Err(self.error_here("'}'"));
            }
            if self.match_token(Token::Semicolon) {
                continue;
            }

            if let FieldDecl::Group(_, group) = self.parse_field()? {
                scope.children.push(group);
            }
        }

        self.expect(Token::RBrace)?;
        scope
            .members
            .push(Member::new(MemberKind::Extend, extendee, Span::new(start, self.prev_end())));
        Ok(())
    }

    /// Parse `reserved 1, 2 to 5, 9 to max;`, `reserved "a", "b";` or `reserved a, b;`
    fn parse_reserved(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("reserved")?;
        let items_start = self.peek_span().start;

        loop {
            match self.peek().map(|(t, _)| t) {
                Some(Token::String(_)) => {
                    self.advance();
                }
                Some(Token::Ident(_)) => {
                    self.advance();
                }
                Some(Token::Int(_)) | Some(Token::Minus) => self.parse_range()?,
                _ => return Err(self.error_here("field number, range or name")),
            }

            if !self.match_token(Token::Comma) {
                break;
            }
        }

        let items = self.source[items_start..self.prev_end()].to_string();
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::Reserved, items, Span::new(start, self.prev_end())))
    }

    /// Parse `extensions 100 to 199 [options];`
    fn parse_extensions(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("extensions")?;
        let items_start = self.peek_span().start;

        loop {
            self.parse_range()?;
            if !self.match_token(Token::Comma) {
                break;
            }
        }

        let items = self.source[items_start..self.prev_end()].to_string();

        if self.check(&Token::LBracket) {
            self.parse_field_options()?;
        }
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::Extensions, items, Span::new(start, self.prev_end())))
    }

    /// Parse `n`, `n to m` or `n to max` (enum ranges may be negative)
    fn parse_range(&mut self) -> ParseResult<()> {
        self.match_token(Token::Minus);
        self.expect_int()?;

        if self.check_word("to") {
            self.advance();
            if self.check_word("max") {
                self.advance();
            } else {
                self.match_token(Token::Minus);
                self.expect_int()?;
            }
        }

        Ok(())
    }

    /// Parse an enum declaration
    fn parse_enum(&mut self) -> ParseResult<Declaration> {
        let start = self.peek_span().start;
        self.expect_word("enum")?;
        let name = self.expect_ident()?.to_string();
        let open = self.expect(Token::LBrace)?.start;

        let mut en = Declaration::new(DeclKind::Enum, name, Span::new(start, start), open, open);

        loop {
            match self.peek().map(|(t, _)| t) {
                None => return Err(self.error_here("'}'")),
                Some(Token::RBrace) => break,
                Some(Token::Semicolon) => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            let not_assignment = !matches!(self.peek_ahead(1), Some(Token::Equals));
            match self.peek_word() {
                Some("option") if not_assignment => {
                    let member = self.parse_option_statement()?;
                    en.members.push(member);
                }
                Some("reserved") if not_assignment => {
                    let member = self.parse_reserved()?;
                    en.members.push(member);
                }
                _ => {
                    let member = self.parse_enum_value()?;
                    en.members.push(member);
                }
            }
        }

        let close = self.expect(Token::RBrace)?.start;
        en.close = close;
        en.span = Span::new(start, close + 1);
        Ok(en)
    }

    /// Parse `NAME = number [options];`
    fn parse_enum_value(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        let name = self.expect_ident()?.to_string();
        self.expect(Token::Equals)?;
        self.match_token(Token::Minus);
        self.expect_int()?;

        if self.check(&Token::LBracket) {
            self.parse_field_options()?;
        }
        self.expect(Token::Semicolon)?;

        Ok(Member::new(MemberKind::EnumValue, name, Span::new(start, self.prev_end())))
    }

    /// Parse a service declaration
    fn parse_service(&mut self) -> ParseResult<Declaration> {
        let start = self.peek_span().start;
        self.expect_word("service")?;
        let name = self.expect_ident()?.to_string();
        let open = self.expect(Token::LBrace)?.start;

        let mut service = Declaration::new(DeclKind::Service, name, Span::new(start, start), open, open);

        loop {
            match self.peek().map(|(t, _)| t) {
                None => return Err(self.error_here("'}'")),
                Some(Token::RBrace) => break,
                Some(Token::Semicolon) => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            match self.peek_word() {
                Some("option") => {
                    let member = self.parse_option_statement()?;
                    service.members.push(member);
                }
                Some("rpc") => {
                    let member = self.parse_rpc()?;
                    service.members.push(member);
                }
                _ => return Err(self.error_here("'rpc', 'option' or '}'")),
            }
        }

        let close = self.expect(Token::RBrace)?.start;
        service.close = close;
        service.span = Span::new(start, close + 1);
        Ok(service)
    }

    /// Parse `rpc Name([stream] Req) returns ([stream] Res) { options } | ;`
    fn parse_rpc(&mut self) -> ParseResult<Member> {
        let start = self.peek_span().start;
        self.expect_word("rpc")?;
        let name = self.expect_ident()?.to_string();

        self.parse_rpc_type()?;
        self.expect_word("returns")?;
        self.parse_rpc_type()?;

        if self.match_token(Token::LBrace) {
            loop {
                match self.peek().map(|(t, _)| t) {
                    None => return Err(self.error_here("'}'")),
                    Some(Token::RBrace) => break,
                    Some(Token::Semicolon) => {
                        self.advance();
                    }
                    _ => {
                        self.parse_option_statement()?;
                    }
                }
            }
            self.expect(Token::RBrace)?;
        } else {
            self.expect(Token::Semicolon)?;
        }

        Ok(Member::new(MemberKind::Rpc, name, Span::new(start, self.prev_end())))
    }

    fn parse_rpc_type(&mut self) -> ParseResult<()> {
        self.expect(Token::LParen)?;
        if self.check_word("stream")
            && matches!(self.peek_ahead(1), Some(Token::Ident(_)) | Some(Token::Dot))
        {
            self.advance();
        }
        self.parse_type_name()?;
        self.expect(Token::RParen)?;
        Ok(())
    }

    /// Parse `[.]ident(.ident)*`
    fn parse_type_name(&mut self) -> ParseResult<String> {
        let mut name = String::new();
        if self.match_token(Token::Dot) {
            name.push('.');
        }
        name.push_str(&self.parse_full_ident()?);
        Ok(name)
    }

    /// Parse `ident(.ident)*`
    fn parse_full_ident(&mut self) -> ParseResult<String> {
        let mut name = self.expect_ident()?.to_string();

        while self.match_token(Token::Dot) {
            name.push('.');
            name.push_str(self.expect_ident()?);
        }

        Ok(name)
    }

    // Lookahead helpers

    /// Keyword followed by a (possibly dotted) name and `{`
    fn looks_like_block(&self) -> bool {
        let mut i = self.pos + 1;
        while let Some((token, _)) = self.tokens.get(i) {
            match token {
                Token::Ident(_) | Token::Dot => i += 1,
                Token::LBrace => return true,
                _ => return false,
            }
        }
        false
    }

    /// `reserved` as a statement rather than a field whose type is named `reserved`
    fn looks_like_reserved(&self) -> bool {
        match self.peek_ahead(1) {
            Some(Token::Int(_)) | Some(Token::String(_)) | Some(Token::Minus) => true,
            Some(Token::Ident(_)) => !matches!(
                self.peek_ahead(2),
                Some(Token::Equals) | Some(Token::Dot) | Some(Token::Ident(_))
            ),
            _ => false,
        }
    }

    /// A `repeated`/`optional`/`required` word is a label when a type follows it
    fn has_label(&self) -> bool {
        match self.peek_ahead(1) {
            Some(Token::Dot) => true,
            Some(Token::Ident(_)) => !matches!(self.peek_ahead(2), Some(Token::Equals)),
            _ => false,
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn peek_ahead(&self, offset: usize) -> Option<&Token<'src>> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    fn peek_word(&self) -> Option<&'src str> {
        match self.tokens.get(self.pos) {
            Some((Token::Ident(s), _)) => Some(*s),
            _ => None,
        }
    }

    fn advance(&mut self) -> Option<&(Token<'src>, Range<usize>)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: &Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(token)
        } else {
            false
        }
    }

    fn check_word(&self, word: &str) -> bool {
        self.peek().map_or(false, |(t, _)| t.is_word(word))
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(&token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> ParseResult<Range<usize>> {
        if self.check(&token) {
            let span = self.peek_span();
            self.advance();
            Ok(span.start..span.end)
        } else {
            Err(self.error_here(&token.to_string()))
        }
    }

    fn expect_word(&mut self, word: &str) -> ParseResult<()> {
        if self.check_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(&format!("keyword '{}'", word)))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<&'src str> {
        match self.peek_word() {
            Some(s) => {
                self.advance();
                Ok(s)
            }
            None => Err(self.error_here("identifier")),
        }
    }

    fn expect_int(&mut self) -> ParseResult<&'src str> {
        match self.peek() {
            Some((Token::Int(n), _)) => {
                let n = *n;
                self.advance();
                Ok(n)
            }
            _ => Err(self.error_here("integer")),
        }
    }

    /// Expect a string literal, returning its contents without quotes
    fn expect_string(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::String(s), _)) => {
                let val = s[1..s.len() - 1].to_string();
                self.advance();
                Ok(val)
            }
            _ => Err(self.error_here("string literal")),
        }
    }

    /// Error describing what was expected at the current position
    fn error_here(&self, expected: &str) -> ParseError {
        if self.is_at_end() {
            ParseError::unexpected_eof(self.source.len(), expected)
        } else {
            ParseError::unexpected_token(self.peek_span(), expected, Self::format_token(self.peek()))
        }
    }

    /// End offset of the last consumed token
    fn prev_end(&self) -> usize {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|(_, span)| span.end)
            .unwrap_or(0)
    }

    /// Get the span of the next token (the one we're about to consume)
    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.clone().into())
            .unwrap_or_else(|| Span::new(self.source.len(), self.source.len()))
    }

    /// Format a token for display in error messages
    fn format_token(token: Option<&(Token, Range<usize>)>) -> String {
        match token {
            None => "end of file".to_string(),
            Some((token, _)) => token.to_string(),
        }
    }
}

pub fn parse(source: &str) -> ParseResult<ProtoFile> {
    let mut parser = Parser::new(source)?;
    parser.parse_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let file = parse(r#"syntax = "proto3";"#).unwrap();

        assert_eq!(file.syntax.as_deref(), Some("proto3"));
        assert!(file.root.children.is_empty());
        assert_eq!(file.root.kind, DeclKind::File);
    }

    #[test]
    fn test_parse_empty() {
        let file = parse("").unwrap();
        assert_eq!(file.root.close, 0);
        assert!(file.root.members.is_empty());
    }

    #[test]
    fn test_delimiter_offsets() {
        let source = "message Foo {}";
        let file = parse(source).unwrap();
        let foo = &file.root.children[0];

        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.open, 12);
        assert_eq!(foo.close, 13);
        assert_eq!(foo.span, Span::new(0, 14));
        assert_eq!(&source[foo.close..foo.close + 1], "}");
    }

    #[test]
    fn test_nested_declarations_in_order() {
        let source = r#"
            message Outer {
                enum Kind { KIND_UNSPECIFIED = 0; }
                message Inner {
                    message Deepest {}
                }
                string name = 1;
            }
        "#;

        let file = parse(source).unwrap();
        let outer = &file.root.children[0];

        assert_eq!(outer.children.len(), 2);
        assert_eq!(outer.children[0].kind, DeclKind::Enum);
        assert_eq!(outer.children[1].name, "Inner");
        assert_eq!(outer.children[1].children[0].name, "Deepest");
        assert!(outer.member("name").is_some());
    }

    #[test]
    fn test_parse_service() {
        let source = r#"
            service Svc {
                option deprecated = true;
                rpc Get(Req) returns (Res) {}
                rpc Watch(stream .pkg.Req) returns (stream Res);
                rpc Opts(Req) returns (Res) {
                    option idempotency_level = NO_SIDE_EFFECTS;
                }
            }
        "#;

        let file = parse(source).unwrap();
        let svc = file.root.child(DeclKind::Service, "Svc").unwrap();
        let rpcs: Vec<_> = svc
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Rpc)
            .map(|m| m.name.as_str())
            .collect();

        assert_eq!(rpcs, vec!["Get", "Watch", "Opts"]);
    }

    #[test]
    fn test_keywords_as_field_names() {
        let source = r#"
            message Foo {
                string message = 1;
                int32 option_value = 2;
                optional string service = 3;
                repeated Foo enum = 4;
            }
        "#;

        let file = parse(source).unwrap();
        let foo = &file.root.children[0];

        assert!(foo.children.is_empty());
        assert_eq!(foo.members.len(), 4);
        assert!(foo.member("message").is_some());
        assert!(foo.member("enum").is_some());
    }

    #[test]
    fn test_reject_garbage() {
        let err = parse("this is not valid proto {{{").unwrap_err();
        assert!(matches!(err, ParseError::InvalidSyntax { .. }));
    }

    #[test]
    fn test_reject_unclosed_message() {
        let err = parse("message Foo {\n  string a = 1;\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_reject_nested_service() {
        let source = "message Foo { service Bar {} }";
        assert!(parse(source).is_err());
    }
}
