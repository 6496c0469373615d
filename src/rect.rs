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

/// A single block copy.
///
/// Copy the `width` x `height` block at (`xsrc`, `ysrc`) of the source
/// image to (`xdest`, `ydest`) of the destination image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub xsrc: u32,
    pub ysrc: u32,
    pub width: u32,
    pub height: u32,
    pub xdest: u32,
    pub ydest: u32,
}

impl Rect {
    pub const fn new(xsrc: u32, ysrc: u32, width: u32, height: u32, xdest: u32, ydest: u32) -> Self {
        Self {
            xsrc,
            ysrc,
            width,
            height,
            xdest,
            ydest,
        }
    }

    /// Copies the whole image onto itself.
    pub const fn identity(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height, 0, 0)
    }

    /// Builds a rect from signed intermediates.
    ///
    /// Returns [None] if any component is negative or does not fit in `u32`.
    pub(crate) fn from_signed(
        xsrc: i64,
        ysrc: i64,
        width: i64,
        height: i64,
        xdest: i64,
        ydest: i64,
    ) -> Option<Self> {
        Some(Self {
            xsrc: xsrc.try_into().ok()?,
            ysrc: ysrc.try_into().ok()?,
            width: width.try_into().ok()?,
            height: height.try_into().ok()?,
            xdest: xdest.try_into().ok()?,
            ydest: ydest.try_into().ok()?,
        })
    }

    /// Swaps source and destination.
    ///
    /// Applying the inverted list of a descramble result scrambles an image.
    pub const fn inverted(&self) -> Self {
        Self::new(
            self.xdest,
            self.ydest,
            self.width,
            self.height,
            self.xsrc,
            self.ysrc,
        )
    }

    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Checks the source block lies within a `width` x `height` image.
    pub fn source_fits(&self, width: u32, height: u32) -> bool {
        fits(self.xsrc, self.width, width) && fits(self.ysrc, self.height, height)
    }

    /// Checks the destination block lies within a `width` x `height` image.
    pub fn destination_fits(&self, width: u32, height: u32) -> bool {
        fits(self.xdest, self.width, width) && fits(self.ydest, self.height, height)
    }

    /// Checks whether two non-empty destination blocks share any pixel.
    pub fn destinations_overlap(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        spans_overlap(self.xdest, self.width, other.xdest, other.width)
            && spans_overlap(self.ydest, self.height, other.ydest, other.height)
    }
}

fn fits(start: u32, len: u32, limit: u32) -> bool {
    start as u64 + len as u64 <= limit as u64
}

fn spans_overlap(a: u32, a_len: u32, b: u32, b_len: u32) -> bool {
    let (a, a_end) = (a as u64, a as u64 + a_len as u64);
    let (b, b_end) = (b as u64, b as u64 + b_len as u64);
    a < b_end && b < a_end
}
