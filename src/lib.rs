//! Library to compute the block copies that undo tile-scrambled images.
//!
//! Scrambled images come with a pair of keys (scramble and unscramble)
//! describing how the image was cut into tiles and rearranged.
//! Two key formats exist:
//!
//! * Grid keys (`ndx-ndy-data`), handled by [GridKeyEngine].
//! * Permutation keys (`=T-j<sign>D-data`), handled by [PermutationKeyEngine].
//!
//! Both turn image dimensions into a list of [Rect] block copies which,
//! applied from the scrambled image into a fresh buffer, restore it.
//! [Descrambler] picks the engine from the key format.
//!
//! Pixel data is never touched by the engines. With the `apply` feature,
//! [apply_rects] performs the copies on [ndarray] buffers.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

#[cfg(feature = "apply")]
mod apply;
pub mod codec;
mod error;
pub mod grid;
pub mod permutation;
mod rect;

#[cfg(feature = "apply")]
#[doc(inline)]
pub use crate::apply::{apply_rects, apply_rects_into};
#[cfg(feature = "apply")]
pub use crate::error::ApplyError;
pub use crate::error::KeyError;
pub use crate::grid::{GridKeyEngine, GridKeyModel, Tile};
pub use crate::permutation::{Adjustments, PermutationKeyEngine, PermutationKeyModel};
pub use crate::rect::Rect;

/// Computes the block copies restoring a scrambled image.
pub trait Descramble {
    /// Block copies for a `width` x `height` scrambled image, in order.
    ///
    /// The result only depends on the key pair and the dimensions.
    fn calculate_coordinates(&self, width: u32, height: u32) -> Vec<Rect>;
}

/// Either engine, selected by key format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descrambler {
    Grid(GridKeyEngine),
    Permutation(PermutationKeyEngine),
}

impl Descrambler {
    /// Builds the engine matching the scramble key's format.
    ///
    /// Keys starting with `=` are permutation keys, which never fail
    /// (see [PermutationKeyEngine::new]). Anything else is parsed as a grid key.
    ///
    /// Only the scramble key is inspected. A permutation scramble key paired
    /// with a grid unscramble key yields the identity engine, while a grid
    /// scramble key paired with a permutation key is a grid parse error.
    pub fn new(scramble_key: &str, unscramble_key: &str) -> Result<Self, KeyError> {
        if scramble_key.starts_with('=') {
            Ok(Self::Permutation(PermutationKeyEngine::new(
                scramble_key,
                unscramble_key,
            )))
        } else {
            GridKeyEngine::new(scramble_key, unscramble_key).map(Self::Grid)
        }
    }
}

impl Descramble for Descrambler {
    fn calculate_coordinates(&self, width: u32, height: u32) -> Vec<Rect> {
        match self {
            Self::Grid(e) => e.calculate_coordinates(width, height),
            Self::Permutation(e) => e.calculate_coordinates(width, height),
        }
    }
}

impl From<GridKeyEngine> for Descrambler {
    fn from(e: GridKeyEngine) -> Self {
        Self::Grid(e)
    }
}

impl From<PermutationKeyEngine> for Descrambler {
    fn from(e: PermutationKeyEngine) -> Self {
        Self::Permutation(e)
    }
}
