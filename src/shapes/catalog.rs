use rand::Rng;

use crate::foundation::math::{all_finite, bounding_radius};
use crate::shapes::generators;

/// Number of shapes in the catalog; the transition sequence cycles through all of them.
pub const CATALOG_SIZE: usize = 8;

/// The named target shapes, in transition order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Vortex,
    Koch,
    Cardioid,
    Butterfly,
    Archimedean,
    Catenary,
    Lemniscate,
    Rose,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; CATALOG_SIZE] = [
        Self::Vortex,
        Self::Koch,
        Self::Cardioid,
        Self::Butterfly,
        Self::Archimedean,
        Self::Catenary,
        Self::Lemniscate,
        Self::Rose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vortex => "Vortex",
            Self::Koch => "Koch",
            Self::Cardioid => "Cardioid",
            Self::Butterfly => "Butterfly",
            Self::Archimedean => "Archimedean",
            Self::Catenary => "Catenary",
            Self::Lemniscate => "Lemniscate",
            Self::Rose => "Rose",
        }
    }

    pub fn generate<R: Rng + ?Sized>(self, particle_count: usize, rng: &mut R) -> ShapeBuffer {
        let coords = match self {
            Self::Vortex => generators::vortex(particle_count, rng),
            Self::Koch => generators::koch(particle_count, rng),
            Self::Cardioid => generators::cardioid(particle_count, rng),
            Self::Butterfly => generators::butterfly(particle_count, rng),
            Self::Archimedean => generators::archimedean(particle_count, rng),
            Self::Catenary => generators::catenary(particle_count, rng),
            Self::Lemniscate => generators::lemniscate(particle_count, rng),
            Self::Rose => generators::rose(particle_count, rng),
        };
        debug_assert_eq!(coords.len(), particle_count * 3);
        ShapeBuffer {
            kind: self,
            coords: coords.into_boxed_slice(),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable interleaved xyz coordinates for one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeBuffer {
    kind: ShapeKind,
    coords: Box<[f32]>,
}

impl ShapeBuffer {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.coords.len() / 3
    }

    pub fn point(&self, particle: usize) -> [f32; 3] {
        let i = particle * 3;
        [self.coords[i], self.coords[i + 1], self.coords[i + 2]]
    }

    pub fn bounding_radius(&self) -> f32 {
        bounding_radius(&self.coords)
    }
}

/// One row of [`ShapeCatalog::summaries`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeSummary {
    pub index: usize,
    pub name: &'static str,
    pub len: usize,
    pub bounding_radius: f32,
    pub finite: bool,
}

/// The ordered set of generated shapes. Built once, read-only afterwards.
#[derive(Clone, Debug)]
pub struct ShapeCatalog {
    particle_count: usize,
    shapes: Vec<ShapeBuffer>,
}

impl ShapeCatalog {
    #[tracing::instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Self {
        let shapes = ShapeKind::ALL
            .iter()
            .map(|kind| kind.generate(particle_count, rng))
            .collect::<Vec<_>>();
        tracing::debug!(shapes = shapes.len(), "generated shape catalog");
        Self {
            particle_count,
            shapes,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape at `index`, wrapping around the catalog.
    pub fn get(&self, index: usize) -> &ShapeBuffer {
        &self.shapes[index % self.shapes.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeBuffer> {
        self.shapes.iter()
    }

    pub fn summaries(&self) -> Vec<ShapeSummary> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| ShapeSummary {
                index,
                name: shape.kind().name(),
                len: shape.len(),
                bounding_radius: shape.bounding_radius(),
                finite: all_finite(shape.as_slice()),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/catalog.rs"]
mod tests;
