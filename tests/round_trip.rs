//! Scramble test images with one key direction and restore them with the other.

#![cfg(feature = "apply")]

mod common;

use ndarray::prelude::*;
use rand::Rng;

use common::{grid_key_pair, permutation_key_pair, rng};
use tilekey::{
    apply_rects, apply_rects_into, Descramble, Descrambler, GridKeyEngine, PermutationKeyEngine,
    Rect,
};

fn image(height: usize, width: usize) -> Array3<u32> {
    Array3::from_shape_fn((height, width, 2), |(y, x, c)| {
        ((y * width + x) * 2 + c) as u32
    })
}

#[test]
fn grid_round_trip() -> anyhow::Result<()> {
    let mut rng = rng(42);
    for _ in 0..40 {
        let (ndx, ndy) = (rng.gen_range(1..=8), rng.gen_range(1..=8));
        let (s, u) = grid_key_pair(ndx, ndy, &mut rng);
        let (width, height) = (rng.gen_range(8..200u32), rng.gen_range(8..200u32));
        let original = image(height as usize, width as usize);

        let forward = GridKeyEngine::new(&u, &s)?.calculate_coordinates(width, height);
        let scrambled = apply_rects(original.view(), &forward)?;

        let backward = GridKeyEngine::new(&s, &u)?.calculate_coordinates(width, height);
        let restored = apply_rects(scrambled.view(), &backward)?;
        assert_eq!(restored, original, "{s} {u} {width}x{height}");
    }
    Ok(())
}

#[test]
fn grid_scramble_moves_pixels() -> anyhow::Result<()> {
    let engine = Descrambler::new("2-2-AAABBABB", "2-2-aaaAAaAA")?;
    let original = image(64, 64);
    let moved = apply_rects(original.view(), &engine.calculate_coordinates(64, 64))?;
    assert_ne!(moved, original);

    let inverse: Vec<Rect> = engine
        .calculate_coordinates(64, 64)
        .iter()
        .map(Rect::inverted)
        .collect();
    assert_eq!(apply_rects(moved.view(), &inverse)?, original);
    Ok(())
}

#[test]
fn permutation_round_trip() -> anyhow::Result<()> {
    let mut rng = rng(4242);
    for _ in 0..40 {
        let (columns, rows) = (rng.gen_range(1..=8usize), rng.gen_range(1..=8usize));
        let border = rng.gen_range(0..3u32);
        let (s, u) = permutation_key_pair(columns, rows, border, &mut rng);
        let engine = PermutationKeyEngine::new(&s, &u);

        let i = rng.gen_range(columns * columns..160);
        let n = rng.gen_range(rows * rows..160);
        let width = i + 2 * columns * border as usize;
        let height = n + 2 * rows * border as usize;

        let rects = engine.calculate_coordinates(width as u32, height as u32);
        let original = image(n, i);

        // Borders get a value no restored pixel can have.
        let mut scrambled = Array3::from_elem((height, width, 2), u32::MAX);
        let inverse: Vec<Rect> = rects.iter().map(Rect::inverted).collect();
        apply_rects_into(original.view(), scrambled.view_mut(), &inverse)?;

        let mut restored = Array3::zeros((n, i, 2));
        apply_rects_into(scrambled.view(), restored.view_mut(), &rects)?;
        assert_eq!(restored, original, "{s} {u} {width}x{height}");
    }
    Ok(())
}
