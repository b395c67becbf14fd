// Host-side tests for the OBJ-subset model decoder.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod model {
    include!("../src/core/model.rs");
}

use model::*;

const TWO_SURFACE_OBJ: &str = "\
# keycap fixture
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vn 0 0 1
g base
f 1/1/1 2/2/1 3/3/1
g C
f 1/1/1 3/3/1 4/1/1
";

#[test]
fn parses_named_surfaces() {
    let m = parse_obj(TWO_SURFACE_OBJ).expect("fixture must parse");
    assert_eq!(m.surfaces.len(), 2);
    assert_eq!(m.surfaces[0].name, "base");
    assert_eq!(m.surfaces[1].name, "C");
    assert_eq!(m.surfaces[0].indices.len(), 3);
    assert_eq!(m.surfaces[1].indices.len(), 3);
}

#[test]
fn authored_normals_and_uvs_survive() {
    let m = parse_obj(TWO_SURFACE_OBJ).unwrap();
    for v in &m.surfaces[0].vertices {
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
    }
    assert_eq!(m.surfaces[0].vertices[1].uv, [1.0, 0.0]);
}

#[test]
fn quad_faces_are_fan_triangulated() {
    let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
g top
f 1 2 3 4
";
    let m = parse_obj(obj).unwrap();
    assert_eq!(m.surfaces[0].indices.len(), 6);
    assert_eq!(m.surfaces[0].vertices.len(), 4);
    assert_eq!(&m.surfaces[0].indices, &[0, 1, 2, 0, 2, 3]);
}

#[test]
fn corners_are_deduplicated_within_a_surface() {
    let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
g top
f 1 2 3
f 1 3 4
";
    let m = parse_obj(obj).unwrap();
    // The two shared corners are reused, not re-emitted
    assert_eq!(m.surfaces[0].vertices.len(), 4);
    assert_eq!(m.surfaces[0].indices.len(), 6);
}

#[test]
fn negative_indices_resolve_from_the_end() {
    let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
g tri
f -3 -2 -1
";
    let m = parse_obj(obj).unwrap();
    assert_eq!(m.surfaces[0].vertices.len(), 3);
    assert_eq!(m.surfaces[0].vertices[2].position, [1.0, 1.0, 0.0]);
}

#[test]
fn missing_normals_are_computed_from_faces() {
    let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
g top
f 1 2 3 4
";
    let m = parse_obj(obj).unwrap();
    for v in &m.surfaces[0].vertices {
        // CCW winding in the XY plane faces +Z
        assert!((v.normal[2] - 1.0).abs() < 1e-5, "normal {:?}", v.normal);
    }
}

#[test]
fn faces_before_any_group_land_in_a_default_surface() {
    let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
f 1 2 3
";
    let m = parse_obj(obj).unwrap();
    assert_eq!(m.surfaces.len(), 1);
    assert_eq!(m.surfaces[0].name, "default");
}

#[test]
fn empty_models_are_a_load_failure() {
    assert!(matches!(parse_obj(""), Err(ModelError::Empty)));
    // Geometry without faces renders nothing, so it counts as empty too
    assert!(matches!(
        parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\n"),
        Err(ModelError::Empty)
    ));
}

#[test]
fn malformed_directives_are_rejected() {
    assert!(parse_obj("v 0 0\nf 1 2 3\n").is_err());
    assert!(parse_obj("v 0 0 zero\n").is_err());
    assert!(matches!(
        parse_obj("v 0 0 0\nf 1 2 9\n"),
        Err(ModelError::IndexOutOfRange { .. })
    ));
}

#[test]
fn bounding_radius_spans_the_farthest_vertex() {
    let m = parse_obj(TWO_SURFACE_OBJ).unwrap();
    let r = m.bounding_radius();
    assert!((r - 2.0f32.sqrt()).abs() < 1e-6);
}
