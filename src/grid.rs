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

//! Grid keys (`ndx-ndy-data`).
//!
//! The image is aligned down to a multiple of 8 on each axis and split into
//! `nd - 1` full units plus one remainder unit. Every tile is addressed in a
//! doubled coordinate space: `floor(v / 2)` counts full units and `v % 2`
//! adds one remainder unit.

use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codec::decode_grid_char;
use crate::error::KeyError;
use crate::rect::Rect;
use crate::Descramble;

static GRID_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]+)-(.+)$").expect("Should be a valid regex"));

/// One tile of a grid key.
///
/// `x`/`y` are doubled logical coordinates, `w`/`h` are size factors
/// (2 for a full unit, 1 for the remainder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: u8,
    pub y: u8,
    pub w: u8,
    pub h: u8,
}

/// A parsed grid key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridKeyModel {
    ndx: u32,
    ndy: u32,
    pieces: Vec<Tile>,
}

impl GridKeyModel {
    /// Parses a single `ndx-ndy-data` key.
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let caps = GRID_KEY
            .captures(key)
            .ok_or_else(|| KeyError::malformed(key, "expected `<ndx>-<ndy>-<data>`"))?;

        let ndx: u32 = caps[1]
            .parse()
            .map_err(|_| KeyError::malformed(key, "ndx is not a number"))?;
        let ndy: u32 = caps[2]
            .parse()
            .map_err(|_| KeyError::malformed(key, "ndy is not a number"))?;
        let data: Vec<char> = caps[3].chars().collect();

        let count = ndx
            .checked_mul(ndy)
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| KeyError::malformed(key, "grid is too large"))?;
        if count.checked_mul(2) != Some(data.len()) {
            return Err(KeyError::malformed(key, "data length is not 2 * ndx * ndy"));
        }

        let mut pieces = Vec::with_capacity(count);
        for d in 0..count {
            let x = decode_coordinate(&data, 2 * d, ndx)?;
            let y = decode_coordinate(&data, 2 * d + 1, ndy)?;
            let (w, h) = size_factors(d as i64, ndx as i64, ndy as i64)
                .ok_or_else(|| KeyError::malformed(key, "tile index past the corner"))?;
            pieces.push(Tile { x, y, w, h });
        }

        Ok(Self { ndx, ndy, pieces })
    }

    pub fn ndx(&self) -> u32 {
        self.ndx
    }

    pub fn ndy(&self) -> u32 {
        self.ndy
    }

    /// Tiles in key order.
    pub fn pieces(&self) -> &[Tile] {
        &self.pieces
    }
}

impl FromStr for GridKeyModel {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn decode_coordinate(data: &[char], position: usize, nd: u32) -> Result<u8, KeyError> {
    let ch = data[position];
    let (_, v) = decode_grid_char(ch).ok_or(KeyError::InvalidCharacter { ch, position })?;

    let max = 2 * nd as u64 - 1;
    if v as u64 > max {
        return Err(KeyError::out_of_range("tile coordinate", v as u64, 0, max));
    }
    Ok(v)
}

/// Size factors of the `d`-th tile.
///
/// Tiles come in key order: interior, then the remainder row, then the
/// remainder column, then the corner.
fn size_factors(d: i64, ndx: i64, ndy: i64) -> Option<(u8, u8)> {
    let interior_end = (ndx - 1) * (ndy - 1) - 1;
    let right_edge_end = interior_end + (ndx - 1);
    let bottom_edge_end = right_edge_end + (ndy - 1);
    let corner_end = bottom_edge_end + 1;

    if d <= interior_end {
        Some((2, 2))
    } else if d <= right_edge_end {
        Some((2, 1))
    } else if d <= bottom_edge_end {
        Some((1, 2))
    } else if d <= corner_end {
        Some((1, 1))
    } else {
        None
    }
}

/// Full unit size and remainder along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisSplit {
    unit: i64,
    rem: i64,
}

impl AxisSplit {
    /// Returns [None] for lengths under 8, which have no aligned extent.
    fn new(len: u32) -> Option<Self> {
        let len = len as i64;
        let n = len - len.rem_euclid(8);
        if n == 0 {
            return None;
        }

        let mut unit = (n - 1).div_euclid(7);
        unit -= unit.rem_euclid(8);
        Some(Self {
            unit,
            rem: n - 7 * unit,
        })
    }

    fn offset(&self, v: u8) -> i64 {
        (v / 2) as i64 * self.unit + (v % 2) as i64 * self.rem
    }

    fn extent(&self, nd: u32) -> i64 {
        self.unit * (nd as i64 - 1) + self.rem
    }
}

/// Descrambler for grid key pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridKeyEngine {
    scramble: GridKeyModel,
    unscramble: GridKeyModel,
}

impl GridKeyEngine {
    /// Parses both keys of a pair.
    ///
    /// The scramble key gives where each tile sits in the scrambled image,
    /// the unscramble key where it belongs in the restored one.
    pub fn new(scramble_key: &str, unscramble_key: &str) -> Result<Self, KeyError> {
        Self::from_models(
            GridKeyModel::parse(scramble_key)?,
            GridKeyModel::parse(unscramble_key)?,
        )
    }

    pub fn from_models(scramble: GridKeyModel, unscramble: GridKeyModel) -> Result<Self, KeyError> {
        if scramble.ndx != unscramble.ndx {
            return Err(KeyError::StructuralMismatch("ndx"));
        }
        if scramble.ndy != unscramble.ndy {
            return Err(KeyError::StructuralMismatch("ndy"));
        }

        debug!(
            "Grid key pair with {}x{} tiles",
            scramble.ndx, scramble.ndy
        );
        Ok(Self {
            scramble,
            unscramble,
        })
    }

    pub fn scramble(&self) -> &GridKeyModel {
        &self.scramble
    }

    pub fn unscramble(&self) -> &GridKeyModel {
        &self.unscramble
    }

    fn rects(&self, width: u32, height: u32) -> Option<Vec<Rect>> {
        let xs = AxisSplit::new(width)?;
        let ys = AxisSplit::new(height)?;

        // Units are sized for at most 8 per axis, wider grids overrun the image.
        let (width, height) = (width as i64, height as i64);
        let l = xs.extent(self.scramble.ndx);
        let v = ys.extent(self.scramble.ndy);
        if l > width || v > height {
            return None;
        }

        let mut rects = Vec::with_capacity(self.scramble.pieces.len() + 2);
        for (f, c) in self.scramble.pieces.iter().zip(&self.unscramble.pieces) {
            rects.push(Rect::from_signed(
                xs.offset(f.x),
                ys.offset(f.y),
                xs.offset(f.w),
                ys.offset(f.h),
                xs.offset(c.x),
                ys.offset(c.y),
            )?);
        }

        if l < width {
            rects.push(Rect::from_signed(l, 0, width - l, v, l, 0)?);
        }
        if v < height {
            rects.push(Rect::from_signed(0, v, width, height - v, 0, v)?);
        }

        Some(rects)
    }
}

impl Descramble for GridKeyEngine {
    fn calculate_coordinates(&self, width: u32, height: u32) -> Vec<Rect> {
        self.rects(width, height).unwrap_or_else(|| {
            debug!("{width}x{height} image cannot hold a grid tiling, leaving as is");
            vec![Rect::identity(width, height)]
        })
    }
}
