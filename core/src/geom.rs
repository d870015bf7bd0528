//! Basic geometric primitives and triangle meshes.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display, Formatter};

use crate::math::vec::{Vec3, vec3};
use crate::render::Model;

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// Triangle, defined by three vertices.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// Returns a new vertex with the given position and attribute.
#[inline]
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// A triangle mesh stored as a flat list of model-space positions.
///
/// Every three consecutive vertices form one triangle; vertices are not
/// shared between faces. The length of the list is always a multiple of
/// three. An empty mesh is valid and renders nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    verts: Vec<Vec3<Model>>,
}

/// Error constructing or loading a mesh.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MeshError {
    /// The number of vertices (or, for flat input, floats) does not form
    /// whole triangles.
    NotTriangles { len: usize },
    /// The mesh source failed to produce a mesh.
    Unavailable(String),
}

/// A collaborator that produces the mesh to be rendered.
///
/// Implemented by [`Cube`], and by any closure returning
/// `Result<Mesh, MeshError>`, so that, for example, a file parser can be
/// plugged in without the core knowing its format.
pub trait MeshSource {
    /// Produces a mesh, or an error describing why none is available.
    fn load(&mut self) -> Result<Mesh, MeshError>;
}

/// A mesh source yielding a cube with corners at (±1, ±1, ±1), made of
/// twelve triangles.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cube;

impl Mesh {
    /// Returns a mesh with the given vertices.
    ///
    /// # Errors
    /// [`MeshError::NotTriangles`] if the number of vertices is not a
    /// multiple of three.
    pub fn new(verts: impl Into<Vec<Vec3<Model>>>) -> Result<Self, MeshError> {
        let verts = verts.into();
        if verts.len() % 3 != 0 {
            return Err(MeshError::NotTriangles { len: verts.len() });
        }
        Ok(Self { verts })
    }

    /// Returns a mesh with no triangles.
    pub const fn empty() -> Self {
        Self { verts: Vec::new() }
    }

    /// Returns a mesh built from a flat list of coordinates, three
    /// floats per vertex and three vertices per triangle.
    ///
    /// # Errors
    /// [`MeshError::NotTriangles`] if the length of `coords` is not a
    /// multiple of nine.
    ///
    /// # Examples
    /// ```
    /// use softras_core::geom::{Mesh, MeshError};
    ///
    /// let tri = Mesh::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    /// assert_eq!(tri.map(|m| m.len()), Ok(1));
    ///
    /// let bad = Mesh::from_flat(&[0.0; 10]);
    /// assert_eq!(bad, Err(MeshError::NotTriangles { len: 10 }));
    /// ```
    pub fn from_flat(coords: &[f32]) -> Result<Self, MeshError> {
        if coords.len() % 9 != 0 {
            return Err(MeshError::NotTriangles { len: coords.len() });
        }
        let verts = coords
            .chunks_exact(3)
            .map(|c| vec3(c[0], c[1], c[2]))
            .collect::<Vec<_>>();
        Self::new(verts)
    }

    /// Returns the vertices of `self`.
    pub fn verts(&self) -> &[Vec3<Model>] {
        &self.verts
    }

    /// Returns the number of triangles in `self`.
    pub fn len(&self) -> usize {
        self.verts.len() / 3
    }

    /// Returns whether `self` has no triangles.
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Returns an iterator over the triangles of `self`.
    pub fn tris(&self) -> impl Iterator<Item = Tri<Vec3<Model>>> + '_ {
        self.verts
            .chunks_exact(3)
            .map(|t| Tri([t[0], t[1], t[2]]))
    }
}

impl Cube {
    #[rustfmt::skip]
    const COORDS: [f32; 108] = [
        // front
        -1.0,  1.0, -1.0,   1.0, -1.0, -1.0,  -1.0, -1.0, -1.0,
        -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
        // right
         1.0,  1.0, -1.0,   1.0, -1.0,  1.0,   1.0, -1.0, -1.0,
         1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
        // left
        -1.0,  1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0, -1.0, -1.0,
        -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,  -1.0, -1.0,  1.0,
        // back
        -1.0,  1.0,  1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
        -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
        // bottom
        -1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
        -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,
        // top
        -1.0,  1.0, -1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
        -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,
    ];

    /// Returns the cube as a mesh.
    pub fn mesh() -> Mesh {
        let verts = Self::COORDS
            .chunks_exact(3)
            .map(|c| vec3(c[0], c[1], c[2]))
            .collect();
        Mesh { verts }
    }
}

impl MeshSource for Cube {
    fn load(&mut self) -> Result<Mesh, MeshError> {
        Ok(Self::mesh())
    }
}

impl<F> MeshSource for F
where
    F: FnMut() -> Result<Mesh, MeshError>,
{
    fn load(&mut self) -> Result<Mesh, MeshError> {
        self()
    }
}

impl Display for MeshError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTriangles { len } => {
                write!(f, "mesh data of length {len} does not form whole triangles")
            }
            Self::Unavailable(msg) => write!(f, "mesh unavailable: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MeshError {}
