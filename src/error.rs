// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use thiserror::Error;

#[cfg(feature = "apply")]
use crate::rect::Rect;

/// Reasons a key string (or key pair) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key does not have the shape its format requires.
    #[error("malformed key {key:?}: {reason}")]
    MalformedKeyGrammar { key: String, reason: &'static str },

    /// The scramble and unscramble keys disagree on grid shape, border or sign.
    #[error("scramble and unscramble keys disagree on {0}")]
    StructuralMismatch(&'static str),

    /// A data character is outside the key format's alphabet.
    #[error("invalid key character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// A size or decoded index is outside its allowed range.
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRangeConstraint {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

impl KeyError {
    pub(crate) fn malformed(key: &str, reason: &'static str) -> Self {
        Self::MalformedKeyGrammar {
            key: key.to_owned(),
            reason,
        }
    }

    pub(crate) fn out_of_range(name: &'static str, value: u64, min: u64, max: u64) -> Self {
        Self::OutOfRangeConstraint {
            name,
            value,
            min,
            max,
        }
    }
}

/// Reasons a rectangle list cannot be applied to a buffer.
#[cfg(feature = "apply")]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("source block {0:?} exceeds the {1}x{2} source buffer")]
    SourceOutOfBounds(Rect, u32, u32),

    #[error("destination block {0:?} exceeds the {1}x{2} destination buffer")]
    DestinationOutOfBounds(Rect, u32, u32),

    #[error("destination blocks {0:?} and {1:?} overlap")]
    OverlappingDestinations(Rect, Rect),

    #[error("buffers disagree on trailing dimensions ({0:?} != {1:?})")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
}
