//! Code-point classes the dispatch table is written in terms of.
//!
//! Everything here operates on a decoded [`Char`]; an invalid code point
//! belongs to no class.

use crate::utf8::Char;

/// Carriage return or line feed.
#[inline]
pub fn is_new_line(chr: Char) -> bool {
    chr == '\r' || chr == '\n'
}

/// Space, tab, or a newline code point.
#[inline]
pub fn is_white_space(chr: Char) -> bool {
    chr == ' ' || chr == '\t' || is_new_line(chr)
}

/// A code point that may start an identifier.
///
/// ASCII letters plus the letter-bearing Unicode ranges: Latin-1 through
/// general punctuation, the post-superscript BMP blocks either side of
/// the surrogates, the Arabic presentation forms, and the supplementary
/// ideographic planes.
#[inline]
pub fn is_alpha(chr: Char) -> bool {
    if !chr.valid() {
        return false;
    }
    let value = chr.value();
    matches!(
        value,
        0x41..=0x5a
            | 0x61..=0x7a
            | 0xc0..=0x2000
            | 0x2070..=0xd7ff
            | 0xe000..=0xfe4f
            | 0xfe70..=0xfeff
            | 0x1_0000..=0x2_fa1f
    )
}

/// An ASCII decimal digit.
#[inline]
pub fn is_digit(chr: Char) -> bool {
    chr.valid() && matches!(chr.value(), 0x30..=0x39)
}

/// [`is_alpha`] or [`is_digit`].
#[inline]
pub fn is_alpha_num(chr: Char) -> bool {
    is_alpha(chr) || is_digit(chr)
}

/// The identifier connector `_`.
#[inline]
pub fn is_underscore(chr: Char) -> bool {
    chr == '_'
}

/// The binary-literal prefix letter.
#[inline]
pub fn is_begin_bin(chr: Char) -> bool {
    chr == 'b' || chr == 'B'
}

/// The octal-literal prefix letter.
#[inline]
pub fn is_begin_oct(chr: Char) -> bool {
    chr == 'c' || chr == 'C'
}

/// The hexadecimal-literal prefix letter.
#[inline]
pub fn is_begin_hex(chr: Char) -> bool {
    chr == 'x' || chr == 'X'
}

/// A binary digit.
#[inline]
pub fn is_bin(chr: Char) -> bool {
    chr == '0' || chr == '1'
}

/// An octal digit.
#[inline]
pub fn is_oct(chr: Char) -> bool {
    chr.valid() && matches!(chr.value(), 0x30..=0x37)
}

/// A hexadecimal digit.
#[inline]
pub fn is_hex(chr: Char) -> bool {
    chr.valid() && matches!(chr.value(), 0x30..=0x39 | 0x41..=0x46 | 0x61..=0x66)
}

/// The `"` delimiter.
#[inline]
pub fn is_double_quote(chr: Char) -> bool {
    chr == '"'
}

/// The `'` delimiter.
#[inline]
pub fn is_single_quote(chr: Char) -> bool {
    chr == '\''
}

/// The `=` code point, the suffix that turns operators into assignments.
#[inline]
pub fn is_equals(chr: Char) -> bool {
    chr == '='
}

/// A code point allowed in a string or character literal body without
/// escaping.
///
/// Printable ASCII other than the quotes and backslash, plus everything
/// non-surrogate from U+0080 up.
#[inline]
pub fn is_normal_alpha(chr: Char) -> bool {
    if !chr.valid() {
        return false;
    }
    let value = chr.value();
    matches!(
        value,
        0x20..=0x21 | 0x23..=0x26 | 0x28..=0x5b | 0x5d..=0x7e | 0x80..=0xd7ff | 0xe000..=0x10_ffff
    )
}
