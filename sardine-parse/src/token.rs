use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::lex::KEYWORD_TYPES;
use crate::loc::Loc;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  // Special token used to represent invalid source code. Easier than having to propagate SyntaxError from the lexer level.
  Invalid,
  // These are only used by lexer.
  CommentMultiline,
  CommentMultilineEnd,
  CommentSingle,
  LineTerminator,
  LiteralNumberBin,
  LiteralNumberHex,
  LiteralNumberOct,
  Whitespace,

  At,
  Ampersand,
  Asterisk,
  Bar,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  ChevronLeft,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  Exclamation,
  Hyphen,
  HyphenHyphen,
  Identifier,
  KeywordAs,
  KeywordAsync,
  KeywordClass,
  KeywordConst,
  KeywordDefault,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFrom,
  KeywordFunction,
  KeywordGet,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordLet,
  KeywordNew,
  KeywordSet,
  KeywordSuper,
  KeywordThis,
  KeywordTypeof,
  KeywordVar,
  KeywordVoid,
  KeywordWith,
  // Reserved words that only ever appear inside skipped code, such as `if` and `return`.
  KeywordReserved,
  // TypeScript keywords
  KeywordAbstract,
  KeywordAny,
  KeywordAsserts,
  KeywordBigIntType,
  KeywordBooleanType,
  KeywordDeclare,
  KeywordImplements,
  KeywordInfer,
  KeywordInterface,
  KeywordIs,
  KeywordKeyof,
  KeywordModule,
  KeywordNamespace,
  KeywordNever,
  KeywordNumberType,
  KeywordObjectType,
  KeywordReadonly,
  KeywordSatisfies,
  KeywordStringType,
  KeywordSymbolType,
  KeywordType,
  KeywordUndefinedType,
  KeywordUnique,
  KeywordUnknown,
  LiteralBigInt,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  // A template literal chunk ending with `${`.
  LiteralTemplatePartString,
  // A template literal chunk ending with the closing backtick.
  LiteralTemplatePartStringEnd,
  LiteralTrue,
  // Operators that only ever appear inside skipped code, such as `===` and `??=`.
  Operator,
  ParenthesisClose,
  ParenthesisOpen,
  Plus,
  PlusPlus,
  PrivateMember,
  Question,
  QuestionDot,
  QuestionDotBracketOpen,
  QuestionDotParenthesisOpen,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,
}

// These can be used as parameter and variable names.
pub static UNRESERVED_KEYWORDS: Lazy<HashSet<TT>> = Lazy::new(|| {
  let mut set = HashSet::<TT>::new();
  set.insert(TT::KeywordAs);
  set.insert(TT::KeywordAsync);
  set.insert(TT::KeywordFrom);
  set.insert(TT::KeywordGet);
  set.insert(TT::KeywordLet);
  set.insert(TT::KeywordSet);
  // TypeScript contextual keywords
  set.insert(TT::KeywordAbstract);
  set.insert(TT::KeywordAny);
  set.insert(TT::KeywordAsserts);
  set.insert(TT::KeywordBigIntType);
  set.insert(TT::KeywordBooleanType);
  set.insert(TT::KeywordDeclare);
  set.insert(TT::KeywordImplements);
  set.insert(TT::KeywordInfer);
  set.insert(TT::KeywordInterface);
  set.insert(TT::KeywordIs);
  set.insert(TT::KeywordKeyof);
  set.insert(TT::KeywordModule);
  set.insert(TT::KeywordNamespace);
  set.insert(TT::KeywordNever);
  set.insert(TT::KeywordNumberType);
  set.insert(TT::KeywordObjectType);
  set.insert(TT::KeywordReadonly);
  set.insert(TT::KeywordSatisfies);
  set.insert(TT::KeywordStringType);
  set.insert(TT::KeywordSymbolType);
  set.insert(TT::KeywordType);
  set.insert(TT::KeywordUndefinedType);
  set.insert(TT::KeywordUnique);
  set.insert(TT::KeywordUnknown);
  set
});

impl TT {
  /// Whether a token of this type can name a binding (variable, parameter, declaration).
  pub fn is_binding_identifier(self) -> bool {
    self == TT::Identifier || UNRESERVED_KEYWORDS.contains(&self)
  }

  /// Whether a token of this type can appear where any IdentifierName is allowed, such as a
  /// property key or an imported name.
  pub fn is_identifier_name(self) -> bool {
    self == TT::Identifier || KEYWORD_TYPES.contains(&self)
  }

  /// Whether an expression can end with a token of this type. Used to decide where automatic
  /// semicolon insertion may end an opaque statement.
  pub fn can_end_expression(self) -> bool {
    matches!(
      self,
      TT::BraceClose
        | TT::BracketClose
        | TT::ParenthesisClose
        | TT::HyphenHyphen
        | TT::PlusPlus
        | TT::LiteralBigInt
        | TT::LiteralFalse
        | TT::LiteralNull
        | TT::LiteralNumber
        | TT::LiteralRegex
        | TT::LiteralString
        | TT::LiteralTemplatePartStringEnd
        | TT::LiteralTrue
        | TT::KeywordThis
        | TT::KeywordSuper
        | TT::PrivateMember
    ) || self.is_binding_identifier()
  }

  /// Whether a token of this type may begin a new statement when it follows a line terminator.
  pub fn can_begin_statement_after_newline(self) -> bool {
    matches!(self, TT::BraceOpen | TT::At | TT::LiteralString | TT::LiteralNumber)
      || (self.is_identifier_name()
        && !matches!(
          self,
          TT::KeywordAs | TT::KeywordIn | TT::KeywordInstanceof | TT::KeywordSatisfies
        ))
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether one or more whitespace characters appear immediately before this token, and at least
  // one of those whitespace characters is a line terminator.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
