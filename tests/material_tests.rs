// Host-side tests for finish selection and surface classification.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod material {
    include!("../src/core/material.rs");
}

use material::*;

#[test]
fn default_finish_is_carbon() {
    assert_eq!(Finish::default(), Finish::Carbon);
}

#[test]
fn finish_specs_are_distinct_and_deterministic() {
    for (i, a) in Finish::ALL.iter().enumerate() {
        // Repeated resolution yields the same tuple
        assert_eq!(a.spec(), a.spec());
        for b in &Finish::ALL[i + 1..] {
            assert_ne!(
                a.spec(),
                b.spec(),
                "{} and {} must have distinct appearance tuples",
                a.label(),
                b.label()
            );
        }
    }
}

#[test]
fn letter_surfaces_are_recognized() {
    assert!(is_letter_surface("letter_top"));
    assert!(is_letter_surface("Letter_Top"));
    assert!(is_letter_surface("engraved_text"));
    assert!(is_letter_surface("C")); // the shipped model's glyph surface
    assert!(!is_letter_surface("base"));
    assert!(!is_letter_surface("stem"));
    assert!(!is_letter_surface("side_walls"));
}

#[test]
fn classifier_is_substring_based_even_for_unrelated_names() {
    // Documented quirk of the naming heuristic: any name containing a "c"
    // classifies as a letter surface.
    assert!(is_letter_surface("Cap_Body"));
    assert!(is_letter_surface("plastic_rim"));
}

#[test]
fn letter_surfaces_ignore_finish_selection() {
    let looks: Vec<SurfaceMaterial> = Finish::ALL
        .iter()
        .map(|f| material_for_surface("C", *f))
        .collect();
    for look in &looks {
        assert_eq!(*look, looks[0], "letter look must not vary with finish");
    }
    assert_eq!(looks[0].base_color, LETTER_BASE_COLOR);
    assert_eq!(looks[0].roughness, LETTER_ROUGHNESS);
    assert_eq!(looks[0].metalness, LETTER_METALNESS);
    assert_eq!(looks[0].bump_intensity, 0.0);
    assert!(looks[0].bump_texture.is_none());
}

#[test]
fn cap_surfaces_take_the_selected_finish() {
    for f in Finish::ALL {
        let spec = f.spec();
        let m = material_for_surface("base", f);
        assert_eq!(m.base_color, CAP_BASE_COLOR);
        assert_eq!(m.roughness, spec.roughness);
        assert_eq!(m.metalness, spec.metalness);
        assert_eq!(m.bump_intensity, spec.bump_intensity);
        assert_eq!(m.bump_texture, Some(spec.bump_texture));
        assert_eq!(m.tiling, spec.tiling);
    }
}

#[test]
fn finish_for_key_maps_digits_and_letters() {
    assert_eq!(finish_for_key("1"), Some(Finish::Matte));
    assert_eq!(finish_for_key("m"), Some(Finish::Matte));
    assert_eq!(finish_for_key("M"), Some(Finish::Matte));
    assert_eq!(finish_for_key("2"), Some(Finish::Glossy));
    assert_eq!(finish_for_key("g"), Some(Finish::Glossy));
    assert_eq!(finish_for_key("3"), Some(Finish::Carbon));
    assert_eq!(finish_for_key("c"), Some(Finish::Carbon));
    assert_eq!(finish_for_key("x"), None);
    assert_eq!(finish_for_key("Escape"), None);
}
