use std::{cmp::Ordering, fmt};

use super::{Char, CharCursor, Chars, TextView, helpers};

/// An owned UTF-8 buffer with a cached code-point count.
///
/// `Text` is the string type the front end accumulates into: token
/// values, identifiers, comment bodies. It shares the code-point indexing
/// and the (length, bytes) ordering of [`TextView`], and adds appends.
/// Appending an invalid [`Char`] writes the U+FDFF replacement instead of
/// corrupting the buffer, so the well-formedness and cached-count
/// invariants hold after every mutation.
#[derive(Clone, Default)]
pub struct Text {
    data: String,
    length: usize,
}

impl Text {
    /// An empty text.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: String::new(),
            length: 0,
        }
    }

    /// A text holding a single code point.
    #[must_use]
    pub fn from_char(chr: Char) -> Self {
        let mut text = Self::new();
        text.push(chr);
        text
    }

    /// A text built from a sequence of code points.
    #[must_use]
    pub fn from_chars(chars: impl IntoIterator<Item = Char>) -> Self {
        let mut text = Self::new();
        for chr in chars {
            text.push(chr);
        }
        text
    }

    /// Length in code points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Length in bytes.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the text contains no code points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The contents as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// The contents as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// A borrowed view of the whole text.
    #[must_use]
    pub fn view(&self) -> TextView<'_> {
        TextView::with_length(&self.data, self.length)
    }

    /// Appends one code point. Invalid values append U+FDFF.
    pub fn push(&mut self, chr: Char) {
        let mut buffer = [0_u8; 4];
        let length = chr.write_to(&mut buffer);
        // The buffer holds a canonical encoding, so this cannot produce
        // ill-formed UTF-8.
        self.data
            .push_str(std::str::from_utf8(&buffer[..length]).unwrap_or("\u{fdff}"));
        self.length += 1;
    }

    /// Appends the contents of another text.
    pub fn push_text(&mut self, other: &TextView<'_>) {
        self.data.push_str(other.as_str());
        self.length += other.len();
    }

    /// Removes all contents.
    pub fn clear(&mut self) {
        self.data.clear();
        self.length = 0;
    }

    /// The code point at code-point offset `index`, or `None` past the
    /// end.
    #[must_use]
    pub fn char_at(&self, index: usize) -> Option<Char> {
        self.view().char_at(index)
    }

    /// The sub-view starting at code-point `offset` spanning `count` code
    /// points, clamped as [`TextView::substr`].
    #[must_use]
    pub fn substr(&self, offset: usize, count: usize) -> TextView<'_> {
        self.view().substr(offset, count)
    }

    /// Bytewise prefix test.
    #[must_use]
    pub fn begins_with(&self, other: &TextView<'_>) -> bool {
        self.view().begins_with(other)
    }

    /// Bytewise suffix test.
    #[must_use]
    pub fn ends_with(&self, other: &TextView<'_>) -> bool {
        self.view().ends_with(other)
    }

    /// A bidirectional cursor positioned at the first code point.
    #[must_use]
    pub fn cursor(&self) -> CharCursor<'_> {
        CharCursor::new(&self.data)
    }

    /// Iterates the code points front to back.
    #[must_use]
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(&self.data)
    }
}

impl From<&str> for Text {
    fn from(data: &str) -> Self {
        Self {
            data: data.to_owned(),
            length: helpers::count_units(data),
        }
    }
}

impl From<String> for Text {
    fn from(data: String) -> Self {
        let length = helpers::count_units(&data);
        Self { data, length }
    }
}

impl From<TextView<'_>> for Text {
    fn from(view: TextView<'_>) -> Self {
        Self {
            data: view.as_str().to_owned(),
            length: view.len(),
        }
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.data == other.data
    }
}

impl Eq for Text {}

impl PartialEq<TextView<'_>> for Text {
    fn eq(&self, other: &TextView<'_>) -> bool {
        self.view() == *other
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.data == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.data == *other
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length
            .cmp(&other.length)
            .then_with(|| self.data.as_bytes().cmp(other.data.as_bytes()))
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Text {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.data)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", self.data)
    }
}
