//! Helpers for writing LWO2 byte streams in tests.

use byteorder::{BigEndian, WriteBytesExt};

/// A top-level chunk: id, `u32` length, payload, pad byte if odd.
pub fn chunk(id: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.write_u32::<BigEndian>(payload.len() as u32).unwrap();
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

/// A nested sub-chunk: id, `u16` length, payload, pad byte if odd.
pub fn subchunk(id: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.write_u16::<BigEndian>(payload.len() as u16).unwrap();
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

/// A complete `FORM`/`LWO2` container around the given chunks.
pub fn form(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut out = b"FORM".to_vec();
    out.write_u32::<BigEndian>(body.len() as u32 + 4).unwrap();
    out.extend_from_slice(b"LWO2");
    out.extend(body);
    out
}

/// A NUL-terminated string padded to an even length.
pub fn string(s: &str) -> Vec<u8> {
    let mut out = s.as_bytes().to_vec();
    out.push(0);
    if out.len() % 2 == 1 {
        out.push(0);
    }
    out
}

pub fn f32s(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::new();
    for &v in values {
        out.write_f32::<BigEndian>(v).unwrap();
    }
    out
}

pub fn u16s(values: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    for &v in values {
        out.write_u16::<BigEndian>(v).unwrap();
    }
    out
}

/// A variable-width index, in the short or long form as needed.
pub fn vx(index: u32) -> Vec<u8> {
    if index < 0xFF00 {
        u16s(&[index as u16])
    } else {
        let mut out = Vec::new();
        out.write_u32::<BigEndian>(index | 0xFF00_0000).unwrap();
        out
    }
}

pub fn pnts(points: &[[f32; 3]]) -> Vec<u8> {
    let flat: Vec<f32> = points.iter().flatten().copied().collect();
    chunk(*b"PNTS", &f32s(&flat))
}

/// A `POLS` chunk of the given type holding one record per polygon.
pub fn pols(kind: [u8; 4], polygons: &[&[u32]]) -> Vec<u8> {
    let mut payload = kind.to_vec();
    for polygon in polygons {
        payload.extend(u16s(&[polygon.len() as u16]));
        for &index in polygon.iter() {
            payload.extend(vx(index));
        }
    }
    chunk(*b"POLS", &payload)
}

pub fn tags(names: &[&str]) -> Vec<u8> {
    let payload: Vec<u8> = names.iter().flat_map(|n| string(n)).collect();
    chunk(*b"TAGS", &payload)
}

/// A `PTAG` chunk of the given type with (polygon, tag) pairs.
pub fn ptag(kind: [u8; 4], pairs: &[(u32, u16)]) -> Vec<u8> {
    let mut payload = kind.to_vec();
    for &(polygon, tag) in pairs {
        payload.extend(vx(polygon));
        payload.extend(u16s(&[tag]));
    }
    chunk(*b"PTAG", &payload)
}

/// A `COLR` sub-chunk with envelope 0.
pub fn colr(rgb: [f32; 3]) -> Vec<u8> {
    let mut payload = f32s(&rgb);
    payload.extend(vx(0));
    subchunk(*b"COLR", &payload)
}

/// A scalar surface sub-chunk (`DIFF`, `TRAN`, ...) with envelope 0.
pub fn surface_scalar(id: [u8; 4], value: f32) -> Vec<u8> {
    let mut payload = f32s(&[value]);
    payload.extend(vx(0));
    subchunk(id, &payload)
}

/// A `BLOK` sub-chunk with an image-map header and an `IMAG` reference.
pub fn image_block(clip: u32) -> Vec<u8> {
    let mut header = string("A");
    header.extend(subchunk(*b"CHAN", b"COLR"));
    let mut payload = subchunk(*b"IMAP", &header);
    payload.extend(subchunk(*b"IMAG", &vx(clip)));
    subchunk(*b"BLOK", &payload)
}

/// A `SURF` chunk named `name` with the given sub-chunks.
pub fn surf(name: &str, subchunks: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = string(name);
    payload.extend(string(""));
    for sub in subchunks {
        payload.extend_from_slice(sub);
    }
    chunk(*b"SURF", &payload)
}

/// A `CLIP` chunk holding a still image.
pub fn clip(index: u32, filename: &str) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u32::<BigEndian>(index).unwrap();
    payload.extend(subchunk(*b"STIL", &string(filename)));
    chunk(*b"CLIP", &payload)
}

/// Four corners of a unit square in the XY plane.
pub fn unit_quad_points() -> Vec<u8> {
    pnts(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ])
}
