//! Keycap model decoding.
//!
//! Parses the Wavefront-OBJ subset the keycap asset uses into named surface
//! meshes ready for GPU upload. `o`/`g`/`usemtl` directives start (or reopen)
//! a named surface; faces are fan-triangulated; missing normals are computed
//! from the faces that share each vertex.

use glam::Vec3;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed {kind} directive at line {line}")]
    Malformed { kind: &'static str, line: usize },
    #[error("face index out of range at line {line}")]
    IndexOutOfRange { line: usize },
    #[error("model contains no renderable surfaces")]
    Empty,
}

/// Interleaved vertex layout shared with the GPU pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// One named surface of the model (the unit material classification acts on).
#[derive(Debug)]
pub struct SurfaceMesh {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Decoded model: a mapping from surface names to renderable geometry.
#[derive(Debug, Default)]
pub struct KeyModel {
    pub surfaces: Vec<SurfaceMesh>,
}

impl KeyModel {
    /// Radius of the model around the origin, used for pointer picking.
    pub fn bounding_radius(&self) -> f32 {
        let mut r2 = 0.0f32;
        for s in &self.surfaces {
            for v in &s.vertices {
                r2 = r2.max(Vec3::from(v.position).length_squared());
            }
        }
        r2.sqrt()
    }
}

struct SurfaceBuilder {
    name: String,
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    // dedup key: (position, texcoord, normal) indices into the global pools
    seen: HashMap<(usize, usize, usize), u32>,
    has_normals: bool,
}

impl SurfaceBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vertices: Vec::new(),
            indices: Vec::new(),
            seen: HashMap::new(),
            has_normals: true,
        }
    }
}

fn resolve_index(raw: i32, pool_len: usize) -> Option<usize> {
    if raw > 0 {
        let i = raw as usize - 1;
        (i < pool_len).then_some(i)
    } else if raw < 0 {
        pool_len.checked_sub(raw.unsigned_abs() as usize)
    } else {
        None
    }
}

fn parse_floats<const N: usize>(
    rest: &[&str],
    kind: &'static str,
    line: usize,
) -> Result<[f32; N], ModelError> {
    let mut out = [0.0f32; N];
    if rest.len() < N {
        return Err(ModelError::Malformed { kind, line });
    }
    for (slot, tok) in out.iter_mut().zip(rest) {
        *slot = tok
            .parse::<f32>()
            .map_err(|_| ModelError::Malformed { kind, line })?;
    }
    Ok(out)
}

/// Parse OBJ text into named surfaces. Fails on malformed directives and on
/// models with no faces at all (the render-nothing failure mode upstream).
pub fn parse_obj(text: &str) -> Result<KeyModel, ModelError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();

    let mut builders: Vec<SurfaceBuilder> = Vec::new();
    let mut current: Option<usize> = None;

    fn open_surface(builders: &mut Vec<SurfaceBuilder>, name: &str) -> usize {
        if let Some(i) = builders.iter().position(|b| b.name == name) {
            i
        } else {
            builders.push(SurfaceBuilder::new(name));
            builders.len() - 1
        }
    }

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = line_no + 1;
        let trimmed = raw_line.split('#').next().unwrap_or("").trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        let rest: Vec<&str> = tokens.collect();
        match keyword {
            "v" => positions.push(parse_floats::<3>(&rest, "v", line)?),
            "vt" => texcoords.push(parse_floats::<2>(&rest, "vt", line)?),
            "vn" => normals.push(parse_floats::<3>(&rest, "vn", line)?),
            "o" | "g" | "usemtl" => {
                let name = if rest.is_empty() { "default" } else { rest[0] };
                current = Some(open_surface(&mut builders, name));
            }
            "f" => {
                if rest.len() < 3 {
                    return Err(ModelError::Malformed { kind: "f", line });
                }
                let surf = match current {
                    Some(i) => i,
                    None => {
                        let i = open_surface(&mut builders, "default");
                        current = Some(i);
                        i
                    }
                };
                let b = &mut builders[surf];
                let mut corner_ids = Vec::with_capacity(rest.len());
                for corner in &rest {
                    let mut parts = corner.split('/');
                    let vi_raw: i32 = parts
                        .next()
                        .and_then(|s| s.parse().ok())
                        .ok_or(ModelError::Malformed { kind: "f", line })?;
                    let vt_raw: Option<i32> =
                        parts.next().filter(|s| !s.is_empty()).map(|s| {
                            s.parse()
                                .map_err(|_| ModelError::Malformed { kind: "f", line })
                        }).transpose()?;
                    let vn_raw: Option<i32> =
                        parts.next().filter(|s| !s.is_empty()).map(|s| {
                            s.parse()
                                .map_err(|_| ModelError::Malformed { kind: "f", line })
                        }).transpose()?;

                    let vi = resolve_index(vi_raw, positions.len())
                        .ok_or(ModelError::IndexOutOfRange { line })?;
                    let vti = match vt_raw {
                        Some(raw) => Some(
                            resolve_index(raw, texcoords.len())
                                .ok_or(ModelError::IndexOutOfRange { line })?,
                        ),
                        None => None,
                    };
                    let vni = match vn_raw {
                        Some(raw) => Some(
                            resolve_index(raw, normals.len())
                                .ok_or(ModelError::IndexOutOfRange { line })?,
                        ),
                        None => None,
                    };
                    if vni.is_none() {
                        b.has_normals = false;
                    }

                    let key = (vi, vti.map_or(usize::MAX, |i| i), vni.map_or(usize::MAX, |i| i));
                    let id = match b.seen.get(&key) {
                        Some(&id) => id,
                        None => {
                            let id = b.vertices.len() as u32;
                            b.vertices.push(MeshVertex {
                                position: positions[vi],
                                normal: vni.map_or([0.0; 3], |i| normals[i]),
                                uv: vti.map_or([0.0; 2], |i| texcoords[i]),
                            });
                            b.seen.insert(key, id);
                            id
                        }
                    };
                    corner_ids.push(id);
                }
                // fan triangulation
                for k in 1..corner_ids.len() - 1 {
                    b.indices.push(corner_ids[0]);
                    b.indices.push(corner_ids[k]);
                    b.indices.push(corner_ids[k + 1]);
                }
            }
            // s, mtllib and anything else the asset may carry are ignored
            _ => {}
        }
    }

    let mut surfaces: Vec<SurfaceMesh> = Vec::new();
    for mut b in builders {
        if b.indices.is_empty() {
            continue;
        }
        if !b.has_normals {
            compute_normals(&mut b.vertices, &b.indices);
        }
        surfaces.push(SurfaceMesh {
            name: b.name,
            vertices: b.vertices,
            indices: b.indices,
        });
    }
    if surfaces.is_empty() {
        return Err(ModelError::Empty);
    }
    Ok(KeyModel { surfaces })
}

/// Area-weighted vertex normals from face winding.
fn compute_normals(vertices: &mut [MeshVertex], indices: &[u32]) {
    let mut accum = vec![Vec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from(vertices[a].position);
        let pb = Vec3::from(vertices[b].position);
        let pc = Vec3::from(vertices[c].position);
        let face = (pb - pa).cross(pc - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    for (v, n) in vertices.iter_mut().zip(accum) {
        v.normal = n.normalize_or_zero().to_array();
    }
}
