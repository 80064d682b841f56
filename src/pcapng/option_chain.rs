//! Read-only access to the options of a block
//!
//! Options are stored in encounter order in the block that owns them. An option is
//! reached either by code ([`PcapNGOptions::get_option`]), or by walking the chain
//! from its head with [`OptionRef::next_option`], or with the restartable iterator
//! returned by [`PcapNGOptions::iter_options`].
//!
//! Codes `0` (`opt_endofopt`) and `1` (`opt_comment`) are reserved: they are reachable by
//! code, but are never reported by [`PcapNGOptions::custom_option_codes`].

use std::iter::FusedIterator;
use std::ops::Deref;

use super::{OptionCode, PcapNGOption};

/// A view of one option inside the option list of a container
///
/// The view knows its position, so the rest of the chain can be reached from it.
#[derive(Clone, Copy, Debug)]
pub struct OptionRef<'o> {
    options: &'o [PcapNGOption<'o>],
    index: usize,
}

impl<'o> OptionRef<'o> {
    /// Option code
    #[inline]
    pub fn code(&self) -> OptionCode {
        self.options[self.index].code
    }

    /// Declared length of the option value, in bytes (may be 0)
    #[inline]
    pub fn len(&self) -> u16 {
        self.options[self.index].len
    }

    /// Returns true if the option carries no value
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Option value, limited to the declared length
    ///
    /// If the declared length exceeds the stored bytes, the stored bytes are returned.
    pub fn data(&self) -> &'o [u8] {
        let opt = &self.options[self.index];
        opt.as_bytes().unwrap_or_else(|_| opt.value())
    }

    /// Option value as stored in the block, including padding
    #[inline]
    pub fn raw_value(&self) -> &'o [u8] {
        self.options[self.index].value()
    }

    /// Position of this option in the chain, starting from 0
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The underlying option
    #[inline]
    pub fn option(&self) -> &'o PcapNGOption<'o> {
        &self.options[self.index]
    }

    /// Next option in the chain, or `None` if this is the last one
    pub fn next_option(&self) -> Option<OptionRef<'o>> {
        let index = self.index + 1;
        if index < self.options.len() {
            Some(OptionRef {
                options: self.options,
                index,
            })
        } else {
            None
        }
    }

    /// Next option in the chain having the given code
    ///
    /// Use this to reach the options following the one returned by
    /// [`PcapNGOptions::get_option`], when a code is present several times.
    pub fn next_with_code(&self, code: OptionCode) -> Option<OptionRef<'o>> {
        let start = self.index + 1;
        self.options[start..]
            .iter()
            .position(|opt| opt.code == code)
            .map(|pos| OptionRef {
                options: self.options,
                index: start + pos,
            })
    }
}

impl<'o> Deref for OptionRef<'o> {
    type Target = PcapNGOption<'o>;

    fn deref(&self) -> &Self::Target {
        self.option()
    }
}

/// Lazy iterator over the options of a container
///
/// The iterator is `Clone`, and a new one can be requested at any time: iteration is
/// restartable and never consumes the options.
#[derive(Clone, Debug)]
pub struct OptionIter<'o> {
    options: &'o [PcapNGOption<'o>],
    index: usize,
}

impl<'o> Iterator for OptionIter<'o> {
    type Item = OptionRef<'o>;

    fn next(&mut self) -> Option<OptionRef<'o>> {
        if self.index < self.options.len() {
            let item = OptionRef {
                options: self.options,
                index: self.index,
            };
            self.index += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.options.len() - self.index;
        (n, Some(n))
    }
}

impl<'o> ExactSizeIterator for OptionIter<'o> {}

impl<'o> FusedIterator for OptionIter<'o> {}

/// Common interface for containers holding a list of options
pub trait PcapNGOptions {
    /// Options of this container, in encounter order
    fn options(&self) -> &[PcapNGOption];

    /// Head of the option chain, or `None` if the container has no option
    fn first_option(&self) -> Option<OptionRef<'_>> {
        self.iter_options().next()
    }

    /// Iterate over the options, in encounter order
    fn iter_options(&self) -> OptionIter<'_> {
        OptionIter {
            options: self.options(),
            index: 0,
        }
    }

    /// Return the first option with the given code
    ///
    /// Multiple options with the same code are allowed, but only the first one is returned.
    /// Use [`OptionRef::next_with_code`] to reach the others.
    fn get_option(&self, code: OptionCode) -> Option<OptionRef<'_>> {
        self.iter_options().find(|opt| opt.code() == code)
    }

    /// Number of options, ignoring `opt_endofopt` and `opt_comment`
    fn num_custom_options(&self) -> usize {
        self.options()
            .iter()
            .filter(|opt| !opt.code.is_reserved())
            .count()
    }

    /// Codes of all options, ignoring `opt_endofopt` and `opt_comment`, in encounter order
    ///
    /// Returns `None` if there is no such option.
    fn custom_option_codes(&self) -> Option<Vec<OptionCode>> {
        let codes: Vec<_> = self
            .options()
            .iter()
            .filter(|opt| !opt.code.is_reserved())
            .map(|opt| opt.code)
            .collect();
        if codes.is_empty() {
            None
        } else {
            Some(codes)
        }
    }
}

impl<'a> PcapNGOptions for [PcapNGOption<'a>] {
    #[inline]
    fn options(&self) -> &[PcapNGOption] {
        self
    }
}

impl<'a> PcapNGOptions for Vec<PcapNGOption<'a>> {
    #[inline]
    fn options(&self) -> &[PcapNGOption] {
        self
    }
}

/// Codes of the options of a container that may be absent
///
/// Returns `None` if the container is absent, or if it has no option other than
/// `opt_endofopt` and `opt_comment`.
pub fn custom_option_codes<B>(container: Option<&B>) -> Option<Vec<OptionCode>>
where
    B: PcapNGOptions + ?Sized,
{
    container.and_then(PcapNGOptions::custom_option_codes)
}

/// Number of options of a container that may be absent, ignoring `opt_endofopt` and `opt_comment`
pub fn num_custom_options<B>(container: Option<&B>) -> usize
where
    B: PcapNGOptions + ?Sized,
{
    container.map_or(0, PcapNGOptions::num_custom_options)
}

/// Find the first option with the given code, in a container that may be absent
pub fn get_option<B>(container: Option<&B>, code: OptionCode) -> Option<OptionRef<'_>>
where
    B: PcapNGOptions + ?Sized,
{
    container.and_then(|c| c.get_option(code))
}
