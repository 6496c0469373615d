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

//! Permutation keys (`=T-j<sign>D-data`).
//!
//! The scrambled image is a `T` x `j` grid of tiles, each surrounded by a
//! border of `D` pixels. The restored image is the same grid without the
//! borders. Tile widths are `ceil(i / T)` except one short column per row,
//! and likewise for heights, where `i` is the width left after borders.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codec::decode_permutation_char;
use crate::error::KeyError;
use crate::rect::Rect;
use crate::Descramble;

static PERMUTATION_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^=([0-9]+)-([0-9]+)([-+])([0-9]+)-(.+)$").expect("Should be a valid regex")
});

const MAX_SIDE: u32 = 8;
const MAX_TILES: u32 = 64;

/// Short-tile positions of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustments {
    /// For each column, the row holding that column's short tile.
    pub col_adjust: Vec<u8>,
    /// For each row, the column holding that row's short tile.
    pub row_adjust: Vec<u8>,
}

/// Header fields as written, so `8` and `08` stay distinct.
struct Header<'a> {
    columns: &'a str,
    rows: &'a str,
    sign: &'a str,
    border: &'a str,
    data: &'a str,
}

impl<'a> Header<'a> {
    fn parse(key: &'a str) -> Result<Self, KeyError> {
        let caps = PERMUTATION_KEY
            .captures(key)
            .ok_or_else(|| KeyError::malformed(key, "expected `=<T>-<j><sign><D>-<data>`"))?;

        let text = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        Ok(Self {
            columns: text(1),
            rows: text(2),
            sign: text(3),
            border: text(4),
            data: text(5),
        })
    }
}

fn number(key: &str, text: &str, what: &'static str) -> Result<u32, KeyError> {
    text.parse().map_err(|_| KeyError::malformed(key, what))
}

struct SubKey {
    adjust: Adjustments,
    permutation: Vec<u8>,
}

impl SubKey {
    fn decode(key: &str, data: &str, columns: usize, rows: usize) -> Result<Self, KeyError> {
        let values = data
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                decode_permutation_char(ch).ok_or(KeyError::InvalidCharacter { ch, position })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != columns + rows + columns * rows {
            return Err(KeyError::malformed(key, "data length is not T + j + T * j"));
        }

        let (col_adjust, rest) = values.split_at(columns);
        let (row_adjust, permutation) = rest.split_at(rows);
        Ok(Self {
            adjust: Adjustments {
                col_adjust: col_adjust.to_vec(),
                row_adjust: row_adjust.to_vec(),
            },
            permutation: permutation.to_vec(),
        })
    }
}

/// A validated permutation key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationKeyModel {
    columns: usize,
    rows: usize,
    border: u32,
    scramble: Adjustments,
    unscramble: Adjustments,
    permutation: Vec<usize>,
}

impl PermutationKeyModel {
    /// Parses and validates a key pair.
    ///
    /// The scramble key carries `+` and the unscramble key `-`.
    pub fn parse(scramble_key: &str, unscramble_key: &str) -> Result<Self, KeyError> {
        let s = Header::parse(scramble_key)?;
        let u = Header::parse(unscramble_key)?;

        if s.columns != u.columns {
            return Err(KeyError::StructuralMismatch("column count"));
        }
        if s.rows != u.rows {
            return Err(KeyError::StructuralMismatch("row count"));
        }
        if s.border != u.border {
            return Err(KeyError::StructuralMismatch("border"));
        }
        if s.sign != "+" || u.sign != "-" {
            return Err(KeyError::StructuralMismatch("sign"));
        }

        let columns = number(scramble_key, s.columns, "column count is not a number")?;
        let rows = number(scramble_key, s.rows, "row count is not a number")?;
        let border = number(scramble_key, s.border, "border is not a number")?;

        for (name, value) in [("column count", columns), ("row count", rows)] {
            if !(1..=MAX_SIDE).contains(&value) {
                return Err(KeyError::out_of_range(
                    name,
                    value as u64,
                    1,
                    MAX_SIDE as u64,
                ));
            }
        }
        let count = columns * rows;
        if count > MAX_TILES {
            return Err(KeyError::out_of_range(
                "tile count",
                count as u64,
                1,
                MAX_TILES as u64,
            ));
        }

        let (columns, rows) = (columns as usize, rows as usize);
        let count = count as usize;
        let scramble = SubKey::decode(scramble_key, s.data, columns, rows)?;
        let unscramble = SubKey::decode(unscramble_key, u.data, columns, rows)?;

        let max = count as u64 - 1;
        let permutation = unscramble
            .permutation
            .iter()
            .map(|&p| {
                let p = p as usize;
                let target = *scramble.permutation.get(p).ok_or_else(|| {
                    KeyError::out_of_range("unscramble permutation index", p as u64, 0, max)
                })? as usize;
                if target >= count {
                    return Err(KeyError::out_of_range(
                        "scramble permutation index",
                        target as u64,
                        0,
                        max,
                    ));
                }
                Ok(target)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            columns,
            rows,
            border,
            scramble: scramble.adjust,
            unscramble: unscramble.adjust,
            permutation,
        })
    }

    /// Number of tile columns (`T`).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of tile rows (`j`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Border around each scrambled tile (`D`).
    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn scramble(&self) -> &Adjustments {
        &self.scramble
    }

    pub fn unscramble(&self) -> &Adjustments {
        &self.unscramble
    }

    /// Restored position of each scrambled tile, in flat row-major indices.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    fn rects(&self, width: u32, height: u32) -> Vec<Rect> {
        let (t, j, d) = (self.columns as i64, self.rows as i64, self.border as i64);

        let i = width as i64 - 2 * t * d;
        let n = height as i64 - 2 * j * d;
        if i <= 0 || n <= 0 {
            debug!("{width}x{height} image has no room inside the tile borders");
            return Vec::new();
        }

        let r = (i + t - 1).div_euclid(t);
        let e = i - (t - 1) * r;
        let s = (n + j - 1).div_euclid(j);
        let h = n - (j - 1) * s;
        if e < 0 || h < 0 {
            debug!("{width}x{height} image is too small for a {t}x{j} grid");
            return Vec::new();
        }

        let mut rects = Vec::with_capacity(self.permutation.len());
        for (o, &target) in self.permutation.iter().enumerate() {
            let (col, row) = (o % self.columns, o / self.columns);
            let short_col = self.unscramble.row_adjust[row] as usize;
            let short_row = self.unscramble.col_adjust[col] as usize;

            let xsrc = d + col as i64 * (r + 2 * d) + shift(short_col, col, e - r);
            let ysrc = d + row as i64 * (s + 2 * d) + shift(short_row, row, h - s);

            let (dcol, drow) = (target % self.columns, target / self.columns);
            let xdest = dcol as i64 * r + shift(self.scramble.row_adjust[drow] as usize, dcol, e - r);
            let ydest = drow as i64 * s + shift(self.scramble.col_adjust[dcol] as usize, drow, h - s);

            let w = if short_col == col { e } else { r };
            let hh = if short_row == row { h } else { s };

            match Rect::from_signed(xsrc, ysrc, w, hh, xdest, ydest) {
                Some(rect) => rects.push(rect),
                None => {
                    debug!("{width}x{height} image overflows tile coordinates");
                    return Vec::new();
                }
            }
        }

        rects
    }
}

/// Offset applied to tiles past the short one.
fn shift(short: usize, index: usize, delta: i64) -> i64 {
    if short < index {
        delta
    } else {
        0
    }
}

/// Descrambler for permutation key pairs.
///
/// Unusable keys are not an error: the engine then leaves the image as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationKeyEngine {
    model: Option<PermutationKeyModel>,
}

impl PermutationKeyEngine {
    pub fn new(scramble_key: &str, unscramble_key: &str) -> Self {
        match PermutationKeyModel::parse(scramble_key, unscramble_key) {
            Ok(model) => Self::from_model(model),
            Err(e) => {
                warn!("Unusable permutation key pair, image is left unchanged: {e}");
                Self::identity()
            }
        }
    }

    pub fn from_model(model: PermutationKeyModel) -> Self {
        debug!(
            "Permutation key pair with {}x{} tiles, border {}",
            model.columns, model.rows, model.border
        );
        Self { model: Some(model) }
    }

    /// An engine that copies every image onto itself.
    pub fn identity() -> Self {
        Self { model: None }
    }

    pub fn model(&self) -> Option<&PermutationKeyModel> {
        self.model.as_ref()
    }

    pub fn is_identity(&self) -> bool {
        self.model.is_none()
    }
}

impl Descramble for PermutationKeyEngine {
    fn calculate_coordinates(&self, width: u32, height: u32) -> Vec<Rect> {
        match &self.model {
            Some(model) => model.rects(width, height),
            None => vec![Rect::identity(width, height)],
        }
    }
}
