use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::DIGIT_BIN;
use crate::char::DIGIT_HEX;
use crate::char::DIGIT_OCT;
use crate::char::ID_CONTINUE;
use crate::char::ID_CONTINUE_CHARSTR;
use crate::char::ID_START;
use crate::char::ID_START_CHARSTR;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use memchr::memchr;
use memchr::memchr3;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  SlashIsRegex,
  Standard,
  TemplateStrContinue,
  // Inside type argument and type parameter lists, `>>` and `>=` are lexed as a single `>` so
  // nested lists such as `Promise<Array<T>>` close one at a time.
  TypeArguments,
}

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

// Contains the match length.
#[derive(Copy, Clone)]
struct Match(usize);

impl Match {
  pub fn len(&self) -> usize {
    self.0
  }

  pub fn prefix(&self, n: usize) -> Match {
    debug_assert!(n <= self.len());
    Match(n)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
  anchored: bool,
}

impl PatternMatcher {
  pub fn new<D: AsRef<[u8]>>(anchored: bool, patterns: Vec<(TT, D)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(if anchored {
        StartKind::Anchored
      } else {
        StartKind::Unanchored
      })
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(syns)
      .expect("static lexer patterns must build");
    PatternMatcher {
      patterns: tts,
      matcher,
      anchored,
    }
  }

  pub fn find(&self, lexer: &Lexer) -> LexResult<(TT, Match)> {
    self
      .matcher
      .find(Input::new(&lexer.source[lexer.next..]).anchored(if self.anchored {
        Anchored::Yes
      } else {
        Anchored::No
      }))
      .map(|m| (self.patterns[m.pattern().as_usize()], Match(m.end())))
      .ok_or(LexNotFound)
  }
}

#[derive(Debug)]
struct LexNotFound;

type LexResult<T> = Result<T, LexNotFound>;

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
    }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  fn remaining(&self) -> usize {
    self.end() - self.next
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn peek(&self, n: usize) -> LexResult<char> {
    self.peek_or_eof(n).ok_or(LexNotFound)
  }

  fn peek_or_eof(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  /// WARNING: Prefer checkpoints instead. Only use this if you know what you're doing.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) {
    self.next = checkpoint.next;
  }

  fn if_char(&self, c: char) -> Match {
    match self.source[self.next..].chars().next() {
      Some(first) if first == c => Match(c.len_utf8()),
      _ => Match(0),
    }
  }

  fn through_char_or_end(&self, c: char) -> Match {
    debug_assert!(c.is_ascii());
    memchr(c as u8, self.source[self.next..].as_bytes())
      .map(|pos| Match(pos + 1))
      .unwrap_or_else(|| Match(self.remaining()))
  }

  fn while_not_3_chars(&self, a: char, b: char, c: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii() && c.is_ascii());
    Match(
      memchr3(a as u8, b as u8, c as u8, self.source[self.next..].as_bytes())
        .unwrap_or(self.remaining()),
    )
  }

  fn while_chars(&self, chars: &CharFilter) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if chars.has(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn consume(&mut self, m: Match) -> Match {
    self.next += m.len();
    m
  }

  fn consume_next(&mut self) -> LexResult<char> {
    let c = self.peek(0)?;
    self.next += c.len_utf8();
    Ok(c)
  }

  fn skip_expect(&mut self, n: usize) {
    debug_assert!(self.next + n <= self.end());
    self.next += n;
  }

  fn drive_fallible(
    &mut self,
    preceded_by_line_terminator: bool,
    f: impl FnOnce(&mut Self) -> LexResult<TT>,
  ) -> Token {
    let cp = self.checkpoint();
    let typ = f(self).unwrap_or(TT::Invalid);
    Token {
      loc: self.since_checkpoint(cp),
      typ,
      preceded_by_line_terminator,
    }
  }
}

#[rustfmt::skip]
pub static OPERATORS_MAPPING: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, TT>::new();
  map.insert("@", TT::At);
  map.insert("&", TT::Ampersand);
  map.insert("&&", TT::Operator);
  map.insert("&&=", TT::Operator);
  map.insert("&=", TT::Operator);
  map.insert("*", TT::Asterisk);
  map.insert("**", TT::Operator);
  map.insert("**=", TT::Operator);
  map.insert("*=", TT::Operator);
  map.insert("|", TT::Bar);
  map.insert("||", TT::Operator);
  map.insert("||=", TT::Operator);
  map.insert("|=", TT::Operator);
  map.insert("}", TT::BraceClose);
  map.insert("{", TT::BraceOpen);
  map.insert("]", TT::BracketClose);
  map.insert("[", TT::BracketOpen);
  map.insert("^", TT::Operator);
  map.insert("^=", TT::Operator);
  map.insert("<", TT::ChevronLeft);
  map.insert("<<", TT::Operator);
  map.insert("<<=", TT::Operator);
  map.insert("<=", TT::Operator);
  map.insert(">", TT::ChevronRight);
  map.insert(">>", TT::ChevronRightChevronRight);
  map.insert(">>>", TT::ChevronRightChevronRightChevronRight);
  map.insert(">>>=", TT::ChevronRightChevronRightChevronRightEquals);
  map.insert(">>=", TT::ChevronRightChevronRightEquals);
  map.insert(">=", TT::ChevronRightEquals);
  map.insert(":", TT::Colon);
  map.insert(",", TT::Comma);
  map.insert(".", TT::Dot);
  map.insert("...", TT::DotDotDot);
  map.insert("=", TT::Equals);
  map.insert("=>", TT::EqualsChevronRight);
  map.insert("==", TT::Operator);
  map.insert("===", TT::Operator);
  map.insert("!", TT::Exclamation);
  map.insert("!=", TT::Operator);
  map.insert("!==", TT::Operator);
  map.insert("-", TT::Hyphen);
  map.insert("-=", TT::Operator);
  map.insert("--", TT::HyphenHyphen);
  map.insert(")", TT::ParenthesisClose);
  map.insert("(", TT::ParenthesisOpen);
  map.insert("%", TT::Operator);
  map.insert("%=", TT::Operator);
  map.insert("+", TT::Plus);
  map.insert("+=", TT::Operator);
  map.insert("++", TT::PlusPlus);
  map.insert("#", TT::PrivateMember);
  map.insert("?", TT::Question);
  map.insert("?.", TT::QuestionDot);
  map.insert("?.[", TT::QuestionDotBracketOpen);
  map.insert("?.(", TT::QuestionDotParenthesisOpen);
  map.insert("??", TT::Operator);
  map.insert("??=", TT::Operator);
  map.insert(";", TT::Semicolon);
  map.insert("/", TT::Slash);
  map.insert("/=", TT::SlashEquals);
  map.insert("~", TT::Tilde);
  map
});

#[rustfmt::skip]
pub static KEYWORDS_MAPPING: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, TT>::new();
  map.insert("as", TT::KeywordAs);
  map.insert("async", TT::KeywordAsync);
  map.insert("break", TT::KeywordReserved);
  map.insert("case", TT::KeywordReserved);
  map.insert("catch", TT::KeywordReserved);
  map.insert("class", TT::KeywordClass);
  map.insert("const", TT::KeywordConst);
  map.insert("continue", TT::KeywordReserved);
  map.insert("debugger", TT::KeywordReserved);
  map.insert("default", TT::KeywordDefault);
  map.insert("delete", TT::KeywordReserved);
  map.insert("do", TT::KeywordReserved);
  map.insert("else", TT::KeywordReserved);
  map.insert("enum", TT::KeywordEnum);
  map.insert("export", TT::KeywordExport);
  map.insert("extends", TT::KeywordExtends);
  map.insert("finally", TT::KeywordReserved);
  map.insert("for", TT::KeywordReserved);
  map.insert("from", TT::KeywordFrom);
  map.insert("function", TT::KeywordFunction);
  map.insert("get", TT::KeywordGet);
  map.insert("if", TT::KeywordReserved);
  map.insert("import", TT::KeywordImport);
  map.insert("in", TT::KeywordIn);
  map.insert("instanceof", TT::KeywordInstanceof);
  map.insert("let", TT::KeywordLet);
  map.insert("new", TT::KeywordNew);
  map.insert("return", TT::KeywordReserved);
  map.insert("set", TT::KeywordSet);
  map.insert("super", TT::KeywordSuper);
  map.insert("switch", TT::KeywordReserved);
  map.insert("this", TT::KeywordThis);
  map.insert("throw", TT::KeywordReserved);
  map.insert("try", TT::KeywordReserved);
  map.insert("typeof", TT::KeywordTypeof);
  map.insert("var", TT::KeywordVar);
  map.insert("void", TT::KeywordVoid);
  map.insert("while", TT::KeywordReserved);
  map.insert("with", TT::KeywordWith);
  map.insert("abstract", TT::KeywordAbstract);
  map.insert("any", TT::KeywordAny);
  map.insert("asserts", TT::KeywordAsserts);
  map.insert("bigint", TT::KeywordBigIntType);
  map.insert("boolean", TT::KeywordBooleanType);
  map.insert("declare", TT::KeywordDeclare);
  map.insert("implements", TT::KeywordImplements);
  map.insert("infer", TT::KeywordInfer);
  map.insert("interface", TT::KeywordInterface);
  map.insert("is", TT::KeywordIs);
  map.insert("keyof", TT::KeywordKeyof);
  map.insert("module", TT::KeywordModule);
  map.insert("namespace", TT::KeywordNamespace);
  map.insert("never", TT::KeywordNever);
  map.insert("number", TT::KeywordNumberType);
  map.insert("object", TT::KeywordObjectType);
  map.insert("readonly", TT::KeywordReadonly);
  map.insert("satisfies", TT::KeywordSatisfies);
  map.insert("string", TT::KeywordStringType);
  map.insert("symbol", TT::KeywordSymbolType);
  map.insert("type", TT::KeywordType);
  map.insert("undefined", TT::KeywordUndefinedType);
  map.insert("unique", TT::KeywordUnique);
  map.insert("unknown", TT::KeywordUnknown);
  map.insert("false", TT::LiteralFalse);
  map.insert("null", TT::LiteralNull);
  map.insert("true", TT::LiteralTrue);
  map
});

pub static KEYWORD_TYPES: Lazy<HashSet<TT>> =
  Lazy::new(|| KEYWORDS_MAPPING.values().copied().collect());

#[rustfmt::skip]
static SIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns: Vec<(TT, String)> = Vec::new();
  for (&v, &k) in OPERATORS_MAPPING.iter() {
    patterns.push((k, v.into()));
  }
  for (&v, &k) in KEYWORDS_MAPPING.iter() {
    patterns.push((k, v.into()));
    // Avoid accidentally matching an identifier starting with a keyword as a keyword.
    for c in ID_CONTINUE_CHARSTR.chars() {
      let mut v = v.to_string();
      v.push(c);
      if !KEYWORDS_MAPPING.contains_key(v.as_str()) {
        patterns.push((TT::Identifier, v));
      }
    }
  }
  for c in ID_START_CHARSTR.chars() {
    patterns.push((TT::Identifier, c.to_string()));
  }
  patterns.push((TT::Identifier, "\\".into()));
  for c in "0123456789".chars() {
    patterns.push((TT::LiteralNumber, c.to_string()));
  }
  patterns.push((TT::LiteralNumberBin, "0b".into()));
  patterns.push((TT::LiteralNumberBin, "0B".into()));
  patterns.push((TT::LiteralNumberHex, "0x".into()));
  patterns.push((TT::LiteralNumberHex, "0X".into()));
  patterns.push((TT::LiteralNumberOct, "0o".into()));
  patterns.push((TT::LiteralNumberOct, "0O".into()));
  // Prevent `.` immediately followed by a digit from being recognised as the `.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::LiteralNumber, format!(".{}", digit)));
  }
  // Prevent `?` immediately followed by a decimal number from being recognised as the `?.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::Question, format!("?.{}", digit)));
  }
  patterns.push((TT::LiteralString, "\"".into()));
  patterns.push((TT::LiteralString, "'".into()));
  patterns.push((TT::LiteralTemplatePartString, "`".into()));

  PatternMatcher::new(true, patterns)
});

static ML_COMMENT: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new::<&str>(false, vec![
    (TT::CommentMultilineEnd, "*/"),
    (TT::LineTerminator, "\r"),
    (TT::LineTerminator, "\n"),
  ])
});

static INSIG: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new::<&str>(
    true,
    vec![
      (TT::LineTerminator, "\r"),
      (TT::LineTerminator, "\n"),
      (TT::LineTerminator, "\u{2028}"),
      (TT::LineTerminator, "\u{2029}"),
      (TT::Whitespace, "\x09"),
      (TT::Whitespace, "\x0b"),
      (TT::Whitespace, "\x0c"),
      (TT::Whitespace, "\x20"),
      (TT::Whitespace, "\u{00A0}"),
      (TT::Whitespace, "\u{FEFF}"),
      (TT::CommentMultiline, "/*"),
      (TT::CommentSingle, "//"),
    ],
  )
});

/// Returns whether the comment includes a line terminator.
fn lex_multiline_comment(lexer: &mut Lexer<'_>) -> bool {
  // Consume `/*`.
  lexer.skip_expect(2);
  let mut contains_newline = false;
  loop {
    let (tt, mat) = ML_COMMENT
      .find(lexer)
      // We can't reject with an error, so we just consume the rest of the source code if no matching `*/` is found.
      .unwrap_or((TT::EOF, Match(lexer.remaining())));
    lexer.consume(mat);
    match tt {
      TT::LineTerminator => contains_newline = true,
      _ => break,
    };
  }
  contains_newline
}

fn lex_single_comment(lexer: &mut Lexer<'_>) {
  // Consume `//`.
  lexer.skip_expect(2);
  // WARNING: Does not consider other line terminators allowed by ECMAScript.
  lexer.consume(lexer.through_char_or_end('\n'));
}

fn lex_unicode_escape(lexer: &mut Lexer<'_>) -> LexResult<()> {
  // We're at '\', consume it.
  lexer.skip_expect(1);
  if lexer.consume_next()? != 'u' {
    return Err(LexNotFound);
  }
  if lexer.peek_or_eof(0) == Some('{') {
    lexer.skip_expect(1);
    if lexer.consume(lexer.while_chars(&DIGIT_HEX)).is_empty() || lexer.consume_next()? != '}' {
      return Err(LexNotFound);
    }
  } else {
    for _ in 0..4 {
      if !DIGIT_HEX.has(lexer.consume_next()?) {
        return Err(LexNotFound);
      }
    }
  }
  Ok(())
}

fn lex_identifier(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let starter = lexer.peek(0)?;
  if starter == '\\' {
    lex_unicode_escape(lexer)?;
  } else {
    lexer.skip_expect(starter.len_utf8());
  }
  loop {
    lexer.consume(lexer.while_chars(&ID_CONTINUE));
    // We assume if it's not ASCII it's part of a UTF-8 byte sequence, and that sequence represents a valid JS identifier continue code point.
    match lexer.peek_or_eof(0) {
      Some('\\') => lex_unicode_escape(lexer)?,
      Some(c) if !c.is_ascii() && !c.is_whitespace() => lexer.skip_expect(c.len_utf8()),
      _ => break,
    };
  }
  Ok(TT::Identifier)
}

fn lex_number(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  lexer.consume(lexer.while_chars(&DIGIT));
  if !lexer.consume(lexer.if_char('n')).is_empty() {
    return Ok(TT::LiteralBigInt);
  }
  if !lexer.consume(lexer.if_char('.')).is_empty() {
    lexer.consume(lexer.while_chars(&DIGIT));
  }
  if matches!(lexer.peek_or_eof(0), Some('e' | 'E')) {
    lexer.skip_expect(1);
    if matches!(lexer.peek(0)?, '+' | '-') {
      lexer.skip_expect(1);
    };
    lexer.consume(lexer.while_chars(&DIGIT));
  }
  Ok(TT::LiteralNumber)
}

fn lex_radix_number(lexer: &mut Lexer<'_>, digits: &CharFilter) -> TT {
  lexer.skip_expect(2);
  lexer.consume(lexer.while_chars(digits));
  if !lexer.consume(lexer.if_char('n')).is_empty() {
    return TT::LiteralBigInt;
  }
  TT::LiteralNumber
}

fn lex_private_member(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  // Include the `#` in the token.
  lexer.skip_expect(1);
  if !ID_START.has(lexer.peek(0)?) {
    return Ok(TT::Invalid);
  };
  lex_identifier(lexer)?;
  Ok(TT::PrivateMember)
}

fn lex_regex(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  // Consume slash.
  lexer.skip_expect(1);
  let mut in_charset = false;
  loop {
    // WARNING: Does not consider other line terminators allowed by ECMAScript.
    match lexer.consume_next()? {
      '\\' => {
        // Cannot escape line terminator.
        if lexer.consume_next()? == '\n' {
          return Ok(TT::Invalid);
        };
      }
      '/' if !in_charset => break,
      '[' => in_charset = true,
      ']' if in_charset => in_charset = false,
      '\n' => return Ok(TT::Invalid),
      _ => {}
    };
  }
  lexer.consume(lexer.while_chars(&ID_CONTINUE));
  Ok(TT::LiteralRegex)
}

fn lex_string(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let quote = lexer.consume_next()?;
  loop {
    lexer.consume(lexer.while_not_3_chars('\\', '\n', quote));
    match lexer.consume_next()? {
      '\\' => {
        // Escape sequence or line continuation.
        lexer.consume_next()?;
      }
      '\n' => return Ok(TT::Invalid),
      _ => break,
    };
  }
  Ok(TT::LiteralString)
}

/// Ends with `${` or backtick.
pub fn lex_template_string_continue(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  loop {
    lexer.consume(lexer.while_not_3_chars('\\', '`', '$'));
    match lexer.consume_next()? {
      '\\' => {
        lexer.consume_next()?;
      }
      '`' => return Ok(TT::LiteralTemplatePartStringEnd),
      '$' => {
        if lexer.peek_or_eof(0) == Some('{') {
          lexer.skip_expect(1);
          return Ok(TT::LiteralTemplatePartString);
        }
      }
      _ => unreachable!(),
    };
  }
}

fn lex_template(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  // Consume backtick.
  lexer.skip_expect(1);
  lex_template_string_continue(lexer)
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  if mode == LexMode::TemplateStrContinue {
    return lexer.drive_fallible(false, lex_template_string_continue);
  };

  let mut preceded_by_line_terminator = false;
  while let Ok((tt, mat)) = INSIG.find(lexer) {
    match tt {
      TT::LineTerminator => {
        lexer.consume(mat);
        preceded_by_line_terminator = true;
      }
      TT::Whitespace => {
        lexer.consume(mat);
      }
      TT::CommentMultiline => {
        preceded_by_line_terminator |= lex_multiline_comment(lexer);
      }
      TT::CommentSingle => {
        // A single-line comment always ends with a line terminator.
        preceded_by_line_terminator = true;
        lex_single_comment(lexer);
      }
      _ => unreachable!(),
    };
  }

  // EOF is different from Invalid, so we should emit this specifically instead of letting drive_fallible return an Invalid.
  if lexer.at_end() {
    return Token {
      loc: lexer.eof_range(),
      typ: TT::EOF,
      preceded_by_line_terminator,
    };
  };

  lexer.drive_fallible(preceded_by_line_terminator, |lexer| {
    if lexer.peek_or_eof(0).is_some_and(|c| !c.is_ascii()) {
      return lex_identifier(lexer);
    }
    let (tt, mut mat) = SIG.find(lexer)?;
    match tt {
      TT::Identifier => lex_identifier(lexer),
      TT::LiteralNumber => lex_number(lexer),
      TT::LiteralNumberBin => Ok(lex_radix_number(lexer, &DIGIT_BIN)),
      TT::LiteralNumberHex => Ok(lex_radix_number(lexer, &DIGIT_HEX)),
      TT::LiteralNumberOct => Ok(lex_radix_number(lexer, &DIGIT_OCT)),
      TT::LiteralString => lex_string(lexer),
      TT::LiteralTemplatePartString => lex_template(lexer),
      TT::PrivateMember => lex_private_member(lexer),
      TT::Slash | TT::SlashEquals if mode == LexMode::SlashIsRegex => lex_regex(lexer),
      TT::ChevronRightChevronRight
      | TT::ChevronRightChevronRightChevronRight
      | TT::ChevronRightChevronRightEquals
      | TT::ChevronRightChevronRightChevronRightEquals
      | TT::ChevronRightEquals
        if mode == LexMode::TypeArguments =>
      {
        lexer.consume(mat.prefix(1));
        Ok(TT::ChevronRight)
      }
      typ => {
        if typ == TT::Question && mat.len() != 1 {
          // We've matched `?.[0-9]`.
          mat = mat.prefix(1);
        };
        lexer.consume(mat);
        Ok(typ)
      }
    }
  })
}
