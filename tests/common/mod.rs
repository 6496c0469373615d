//! Random valid key pairs and layout checks shared by the integration tests.

#![allow(dead_code)]

use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;

use tilekey::Rect;

pub fn rng(seed: u64) -> Xoshiro256StarStar {
    Xoshiro256StarStar::seed_from_u64(seed)
}

/// Asserts destinations exactly tile `[0, width) x [0, height)`.
pub fn assert_partition(rects: &[Rect], width: u32, height: u32) {
    let mut area = 0;
    for (i, r) in rects.iter().enumerate() {
        assert!(
            r.destination_fits(width, height),
            "{r:?} outside {width}x{height}"
        );
        for o in &rects[..i] {
            assert!(!o.destinations_overlap(r), "{o:?} overlaps {r:?}");
        }
        area += r.area();
    }
    assert_eq!(area, width as u64 * height as u64, "{rects:?}");
}

fn grid_char(v: u8) -> char {
    let base = if v % 2 == 0 { b'A' } else { b'a' };
    (base + v / 2) as char
}

/// Doubled coordinates of full slots and the remainder slot along one axis.
fn axis_slots(nd: u8, rem_slot: u8) -> (Vec<u8>, u8) {
    let full = (0..nd)
        .filter(|&k| k != rem_slot)
        .map(|k| if k < rem_slot { 2 * k } else { 2 * (k - 1) + 1 })
        .collect();
    (full, 2 * rem_slot)
}

/// Tile coordinates of one grid key, in key order.
fn grid_layout(ndx: u8, ndy: u8, rng: &mut impl Rng) -> Vec<(u8, u8)> {
    let (full_x, rem_x) = axis_slots(ndx, rng.gen_range(0..ndx));
    let (full_y, rem_y) = axis_slots(ndy, rng.gen_range(0..ndy));

    let mut interior: Vec<_> = full_y
        .iter()
        .flat_map(|&y| full_x.iter().map(move |&x| (x, y)))
        .collect();
    let mut rem_row: Vec<_> = full_x.iter().map(|&x| (x, rem_y)).collect();
    let mut rem_col: Vec<_> = full_y.iter().map(|&y| (rem_x, y)).collect();
    interior.shuffle(rng);
    rem_row.shuffle(rng);
    rem_col.shuffle(rng);

    let mut out = interior;
    out.extend(rem_row);
    out.extend(rem_col);
    out.push((rem_x, rem_y));
    out
}

fn grid_key(ndx: u8, ndy: u8, layout: &[(u8, u8)]) -> String {
    let data: String = layout
        .iter()
        .flat_map(|&(x, y)| [grid_char(x), grid_char(y)])
        .collect();
    format!("{ndx}-{ndy}-{data}")
}

/// A random valid grid key pair `(scramble, unscramble)`.
pub fn grid_key_pair(ndx: u8, ndy: u8, rng: &mut impl Rng) -> (String, String) {
    let s = grid_layout(ndx, ndy, rng);
    let u = grid_layout(ndx, ndy, rng);
    (grid_key(ndx, ndy, &s), grid_key(ndx, ndy, &u))
}

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn permutation_key(
    columns: usize,
    rows: usize,
    sign: char,
    border: u32,
    short_row: usize,
    short_col: usize,
    perm: &[usize],
) -> String {
    let values = std::iter::repeat(short_row)
        .take(columns)
        .chain(std::iter::repeat(short_col).take(rows))
        .chain(perm.iter().copied());
    let data: String = values.map(|v| ALPHABET[v] as char).collect();
    format!("={columns}-{rows}{sign}{border}-{data}")
}

/// A random valid permutation key pair `(scramble, unscramble)`.
///
/// Each key puts its short column and short row at one random index, and
/// the permutation only moves tiles between cells of the same size.
pub fn permutation_key_pair(
    columns: usize,
    rows: usize,
    border: u32,
    rng: &mut impl Rng,
) -> (String, String) {
    let count = columns * rows;
    let (s_col, s_row) = (rng.gen_range(0..columns), rng.gen_range(0..rows));
    let (u_col, u_row) = (rng.gen_range(0..columns), rng.gen_range(0..rows));

    let class = |cell: usize, short_col: usize, short_row: usize| {
        (cell % columns == short_col, cell / columns == short_row)
    };

    // Scrambled cell -> restored cell.
    let mut fin = vec![0; count];
    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        let sources: Vec<_> = (0..count)
            .filter(|&c| class(c, u_col, u_row) == (a, b))
            .collect();
        let mut targets: Vec<_> = (0..count)
            .filter(|&c| class(c, s_col, s_row) == (a, b))
            .collect();
        targets.shuffle(rng);
        for (s, t) in sources.into_iter().zip(targets) {
            fin[s] = t;
        }
    }

    let mut unscramble: Vec<_> = (0..count).collect();
    unscramble.shuffle(rng);
    let mut scramble = vec![0; count];
    for (u, &q) in unscramble.iter().enumerate() {
        scramble[q] = fin[u];
    }

    (
        permutation_key(columns, rows, '+', border, s_row, s_col, &scramble),
        permutation_key(columns, rows, '-', border, u_row, u_col, &unscramble),
    )
}
