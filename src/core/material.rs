//! Finish selection and per-surface material resolution.
//!
//! Surfaces are classified once at model load: engraved-letter surfaces keep
//! a fixed white/glossy look regardless of the selected finish, everything
//! else takes the finish's appearance tuple.

/// Cap body base color shared by the non-letter surfaces.
pub const CAP_BASE_COLOR: [f32; 3] = [0.07, 0.08, 0.10];

/// Fixed appearance of engraved-letter surfaces.
pub const LETTER_BASE_COLOR: [f32; 3] = [0.95, 0.96, 0.97];
pub const LETTER_ROUGHNESS: f32 = 0.12;
pub const LETTER_METALNESS: f32 = 0.0;

/// Selected cap finish. Closed set; each maps to a fixed appearance tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Finish {
    Matte,
    Glossy,
    #[default]
    Carbon,
}

/// Appearance tuple for one finish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinishSpec {
    pub roughness: f32,
    pub metalness: f32,
    pub bump_intensity: f32,
    pub bump_texture: &'static str,
    pub tiling: [f32; 2],
}

impl Finish {
    pub const ALL: [Finish; 3] = [Finish::Matte, Finish::Glossy, Finish::Carbon];

    pub fn spec(self) -> FinishSpec {
        match self {
            Finish::Matte => FinishSpec {
                roughness: 0.92,
                metalness: 0.0,
                bump_intensity: 0.35,
                bump_texture: "assets/bump_matte.png",
                tiling: [2.0, 2.0],
            },
            Finish::Glossy => FinishSpec {
                roughness: 0.08,
                metalness: 0.05,
                bump_intensity: 0.08,
                bump_texture: "assets/bump_gloss.png",
                tiling: [1.0, 1.0],
            },
            Finish::Carbon => FinishSpec {
                roughness: 0.45,
                metalness: 0.35,
                bump_intensity: 0.80,
                bump_texture: "assets/bump_carbon.png",
                tiling: [6.0, 6.0],
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Finish::Matte => "matte",
            Finish::Glossy => "glossy",
            Finish::Carbon => "carbon",
        }
    }
}

/// Map a keyboard key to a finish, or None for unrelated keys.
#[inline]
pub fn finish_for_key(key: &str) -> Option<Finish> {
    match key {
        "1" | "m" | "M" => Some(Finish::Matte),
        "2" | "g" | "G" => Some(Finish::Glossy),
        "3" | "c" | "C" => Some(Finish::Carbon),
        _ => None,
    }
}

/// Naming heuristic for engraved-letter surfaces. The bare "c" match is kept
/// for compatibility with the shipped keycap model, whose glyph surface is
/// literally named "C".
#[inline]
pub fn is_letter_surface(name: &str) -> bool {
    let n = name.to_ascii_lowercase();
    n.contains("letter") || n.contains("text") || n.contains('c')
}

/// Resolved appearance parameters for one named surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub bump_intensity: f32,
    pub bump_texture: Option<&'static str>,
    pub tiling: [f32; 2],
}

/// Resolve the material for a named surface under the given finish.
/// Classification is static for the life of the object; letter surfaces are
/// immune to finish changes.
pub fn material_for_surface(name: &str, finish: Finish) -> SurfaceMaterial {
    if is_letter_surface(name) {
        return SurfaceMaterial {
            base_color: LETTER_BASE_COLOR,
            roughness: LETTER_ROUGHNESS,
            metalness: LETTER_METALNESS,
            bump_intensity: 0.0,
            bump_texture: None,
            tiling: [1.0, 1.0],
        };
    }
    let spec = finish.spec();
    SurfaceMaterial {
        base_color: CAP_BASE_COLOR,
        roughness: spec.roughness,
        metalness: spec.metalness,
        bump_intensity: spec.bump_intensity,
        bump_texture: Some(spec.bump_texture),
        tiling: spec.tiling,
    }
}
