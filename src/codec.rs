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

//! Single-character decoders for both key alphabets.

/// Decodes a grid key character.
///
/// Uppercase letters decode to `(0, 2n)`, lowercase letters to `(1, 2n + 1)`,
/// where `n` is the letter's position in the alphabet.
pub fn decode_grid_char(c: char) -> Option<(u8, u8)> {
    match c {
        'A'..='Z' => Some((0, 2 * (c as u8 - b'A'))),
        'a'..='z' => Some((1, 2 * (c as u8 - b'a') + 1)),
        _ => None,
    }
}

/// Code point to value table for permutation keys (base64-url order).
#[rustfmt::skip]
static PERMUTATION_TABLE: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 62, -1, -1,
    52, 53, 54, 55, 56, 57, 58, 59, 60, 61, -1, -1, -1, -1, -1, -1,
    -1,  0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14,
    15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, -1, -1, -1, -1, 63,
    -1, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40,
    41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, -1, -1, -1, -1, -1,
];

/// Decodes a permutation key character into `0..64`.
pub fn decode_permutation_char(c: char) -> Option<u8> {
    let v = *PERMUTATION_TABLE.get(c as usize)?;
    u8::try_from(v).ok()
}
