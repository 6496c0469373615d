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

use ndarray::prelude::*;
use ndarray::{azip, Slice};
use rayon::prelude::*;

use crate::error::ApplyError;
use crate::rect::Rect;

fn extent(shape: &[usize]) -> (u32, u32) {
    assert!(
        shape.len() >= 2,
        "Array must have at least 2 dimensions (got {})",
        shape.len()
    );

    let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
    (clamp(shape[1]), clamp(shape[0]))
}

fn validate(rects: &[Rect], src: (u32, u32), dst: (u32, u32)) -> Result<(), ApplyError> {
    for (i, r) in rects.iter().enumerate() {
        if !r.source_fits(src.0, src.1) {
            return Err(ApplyError::SourceOutOfBounds(*r, src.0, src.1));
        }
        if !r.destination_fits(dst.0, dst.1) {
            return Err(ApplyError::DestinationOutOfBounds(*r, dst.0, dst.1));
        }
        if let Some(o) = rects[..i].iter().find(|o| o.destinations_overlap(r)) {
            return Err(ApplyError::OverlappingDestinations(*o, *r));
        }
    }

    Ok(())
}

/// Applies block copies from `src` onto a copy of itself.
///
/// Pixels not covered by any destination keep their source value.
/// See [apply_rects_into] for the layout rules.
pub fn apply_rects<A, D>(src: ArrayView<'_, A, D>, rects: &[Rect]) -> Result<Array<A, D>, ApplyError>
where
    A: Clone + Send + Sync,
    D: Dimension,
{
    let mut out = src.to_owned();
    apply_rects_into(src, out.view_mut(), rects)?;
    Ok(out)
}

/// Applies block copies from `src` into `dst`.
///
/// The first two axes are rows and columns, any further axes (channels)
/// are copied whole and must agree between both arrays. Every block must
/// fit both arrays and destination blocks must not overlap; nothing is
/// written otherwise.
///
/// Panics if an array has fewer than 2 dimensions.
pub fn apply_rects_into<A, D>(
    src: ArrayView<'_, A, D>,
    dst: ArrayViewMut<'_, A, D>,
    rects: &[Rect],
) -> Result<(), ApplyError>
where
    A: Clone + Send + Sync,
    D: Dimension,
{
    let src_extent = extent(src.shape());
    let dst_extent = extent(dst.shape());
    if src.shape()[2..] != dst.shape()[2..] {
        return Err(ApplyError::ShapeMismatch(
            src.shape()[2..].to_vec(),
            dst.shape()[2..].to_vec(),
        ));
    }

    validate(rects, src_extent, dst_extent)?;

    rects
        .par_iter()
        .filter(|r| !r.is_empty())
        .for_each(move |r| {
            let (xs, ys) = (r.xsrc as usize, r.ysrc as usize);
            let (xd, yd) = (r.xdest as usize, r.ydest as usize);
            let (w, h) = (r.width as usize, r.height as usize);

            let mut src = src.view();
            src.slice_axis_inplace(Axis(0), Slice::from(ys..ys + h));
            src.slice_axis_inplace(Axis(1), Slice::from(xs..xs + w));

            let mut out = dst.raw_view();
            out.slice_axis_inplace(Axis(0), Slice::from(yd..yd + h));
            out.slice_axis_inplace(Axis(1), Slice::from(xd..xd + w));

            // SAFETY: Destination blocks are in bounds and pairwise disjoint
            azip!((d in out, s in src) unsafe {
                (*(d as *mut A)).clone_from(s)
            });
        });

    Ok(())
}
