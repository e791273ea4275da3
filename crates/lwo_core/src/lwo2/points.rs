//! `PNTS`: vertex positions.

use crate::mesh::Vertex;

use super::cursor::ByteCursor;
use super::error::DecodeResult;

const POINT_SIZE: usize = 12;

/// Append the positions of a `PNTS` payload to `vertices`.
///
/// Returns the number of points read. A trailing partial record is
/// ignored.
pub fn read_points(payload: &mut ByteCursor<'_>, vertices: &mut Vec<Vertex>) -> DecodeResult<usize> {
    let count = payload.remaining() / POINT_SIZE;
    if payload.remaining() % POINT_SIZE != 0 {
        log::warn!(
            "PNTS payload of {} bytes is not a multiple of {}; ignoring {} trailing bytes",
            payload.remaining(),
            POINT_SIZE,
            payload.remaining() % POINT_SIZE
        );
    }

    vertices.reserve(count);
    for _ in 0..count {
        vertices.push(Vertex::new(payload.read_vec3()?));
    }

    Ok(count)
}
