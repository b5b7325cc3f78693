//! The [`Token`] type consumed by the [`combinator`](crate::combinator) engine.

use std::ops::Deref;

use super::{tokenize, LexError};

/// The category of a [`Token`].
///
/// Category matchers ([`MatchTag`](crate::combinator::MatchTag)) compare only
/// this tag, while keyword and operator matchers also compare the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Keywords and operators.
    Reserved,
    /// Integer literals.
    Int,
    /// Variable names.
    Id,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Tag::Reserved => "RESERVED",
            Tag::Int => "INT",
            Tag::Id => "ID",
        })
    }
}

/// A `(text, tag)` pair borrowed from some source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    /// The slice of source text matched by this token.
    pub text: &'src str,
    /// The category of this token.
    pub tag: Tag,
}

sa::assert_impl_all!(Token<'static>: Copy, Send, Sync);

impl<'src> Token<'src> {
    /// Constructs a new [`Token`].
    pub const fn new(text: &'src str, tag: Tag) -> Self {
        Self { text, tag }
    }

    /// Constructs a [`Tag::Reserved`] token.
    pub const fn reserved(text: &'src str) -> Self {
        Self::new(text, Tag::Reserved)
    }

    /// Constructs a [`Tag::Int`] token.
    pub const fn int(text: &'src str) -> Self {
        Self::new(text, Tag::Int)
    }

    /// Constructs a [`Tag::Id`] token.
    pub const fn id(text: &'src str) -> Self {
        Self::new(text, Tag::Id)
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {})", self.text, self.tag)
    }
}

/// An owned sequence of [`Token`]s, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens<'src>(Vec<Token<'src>>);

impl<'src> Tokens<'src> {
    /// Returns the underlying tokens as a slice.
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.0
    }
}

impl<'src> From<Vec<Token<'src>>> for Tokens<'src> {
    fn from(value: Vec<Token<'src>>) -> Self {
        Self(value)
    }
}

impl<'src> TryFrom<&'src str> for Tokens<'src> {
    type Error = LexError;

    fn try_from(value: &'src str) -> Result<Self, Self::Error> {
        tokenize(value).map(Self)
    }
}

impl<'src> Deref for Tokens<'src> {
    type Target = [Token<'src>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'src> AsRef<[Token<'src>]> for Tokens<'src> {
    fn as_ref(&self) -> &[Token<'src>] {
        &self.0
    }
}

impl<'src> IntoIterator for Tokens<'src> {
    type Item = Token<'src>;
    type IntoIter = std::vec::IntoIter<Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
