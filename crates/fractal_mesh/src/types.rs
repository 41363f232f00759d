//! Core data types shared by generation, packing and analysis.

use glam::{DVec3, Vec3};

use crate::constants::{
  DEFAULT_COLOR, FLOATS_PER_VERTEX, TETRAHEDRON_CHILDREN, TETRAHEDRON_FRAMING_FACTOR,
  TETRAHEDRON_VERTICES, TRIANGLE_CHILDREN, TRIANGLE_FRAMING_FACTOR, TRIANGLE_VERTICES,
};

/// Immutable 3-component coordinate used during subdivision.
///
/// Subdivision runs in double precision; buffers are narrowed to `f32` at
/// packing time.
pub type Point3 = DVec3;

/// Discriminant of a [`Primitive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
  Triangle,
  Tetrahedron,
}

impl PrimitiveKind {
  /// Children produced by one subdivision step.
  #[inline]
  pub const fn child_count(self) -> usize {
    match self {
      PrimitiveKind::Triangle => TRIANGLE_CHILDREN,
      PrimitiveKind::Tetrahedron => TETRAHEDRON_CHILDREN,
    }
  }

  /// Vertices this primitive contributes to a packed triangle list.
  #[inline]
  pub const fn packed_vertex_count(self) -> usize {
    match self {
      PrimitiveKind::Triangle => TRIANGLE_VERTICES,
      PrimitiveKind::Tetrahedron => TETRAHEDRON_VERTICES,
    }
  }

  /// Floats this primitive contributes to a packed buffer.
  #[inline]
  pub const fn packed_float_count(self) -> usize {
    self.packed_vertex_count() * FLOATS_PER_VERTEX
  }
}

/// Unit of recursive subdivision.
///
/// Corner order is significant: it fixes the child enumeration and the
/// winding of every emitted facet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
  /// Planar facet (A, B, C).
  Triangle([Point3; 3]),
  /// Solid (A, B, C, D).
  Tetrahedron([Point3; 4]),
}

impl Primitive {
  pub fn triangle(a: Point3, b: Point3, c: Point3) -> Self {
    Primitive::Triangle([a, b, c])
  }

  pub fn tetrahedron(a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
    Primitive::Tetrahedron([a, b, c, d])
  }

  #[inline]
  pub fn kind(&self) -> PrimitiveKind {
    match self {
      Primitive::Triangle(_) => PrimitiveKind::Triangle,
      Primitive::Tetrahedron(_) => PrimitiveKind::Tetrahedron,
    }
  }

  /// Defining corners in order.
  #[inline]
  pub fn corners(&self) -> &[Point3] {
    match self {
      Primitive::Triangle(c) => c.as_slice(),
      Primitive::Tetrahedron(c) => c.as_slice(),
    }
  }

  /// Arithmetic mean of the corners.
  pub fn centroid(&self) -> Point3 {
    let corners = self.corners();
    corners.iter().copied().sum::<Point3>() / corners.len() as f64
  }

  /// Triangular facets in emission order.
  ///
  /// A tetrahedron yields (A,B,C), (A,C,D), (A,D,B), (B,D,C): a closed
  /// surface with outward winding when D lies on the negative side of ABC.
  pub fn facets(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
    let faces: &[[usize; 3]] = match self {
      Primitive::Triangle(_) => &[[0, 1, 2]],
      Primitive::Tetrahedron(_) => &[[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]],
    };
    let corners = self.corners();
    faces
      .iter()
      .map(move |&[i, j, k]| [corners[i], corners[j], corners[k]])
  }
}

/// Base shape selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeVariant {
  /// Sierpinski triangle in the XY plane.
  #[default]
  Triangle,
  /// Sierpinski tetrahedron resting on its base.
  Tetrahedron,
}

impl ShapeVariant {
  pub fn kind(self) -> PrimitiveKind {
    match self {
      ShapeVariant::Triangle => PrimitiveKind::Triangle,
      ShapeVariant::Tetrahedron => PrimitiveKind::Tetrahedron,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      ShapeVariant::Triangle => "triangle",
      ShapeVariant::Tetrahedron => "tetrahedron",
    }
  }

  /// Whether explode mode applies to this variant.
  pub fn supports_explode(self) -> bool {
    matches!(self, ShapeVariant::Tetrahedron)
  }

  /// Camera distance per unit of bounding radius.
  pub fn framing_factor(self) -> f32 {
    match self {
      ShapeVariant::Triangle => TRIANGLE_FRAMING_FACTOR,
      ShapeVariant::Tetrahedron => TETRAHEDRON_FRAMING_FACTOR,
    }
  }

  /// Unit direction from the view target towards the camera.
  pub fn view_direction(self) -> Vec3 {
    match self {
      ShapeVariant::Triangle => Vec3::Z,
      ShapeVariant::Tetrahedron => Vec3::new(0.6, 0.5, 1.0).normalize(),
    }
  }

  /// Depth-0 primitive centred on the origin.
  ///
  /// Triangle: equilateral, side `2 * scale`, centroid at the origin.
  /// Tetrahedron: regular, edge `2 * scale`, apex on +Y, base parallel to XZ.
  pub fn base_primitive(self, scale: f64) -> Primitive {
    match self {
      ShapeVariant::Triangle => {
        let h = 3.0_f64.sqrt();
        Primitive::triangle(
          DVec3::new(-1.0, -h / 3.0, 0.0) * scale,
          DVec3::new(1.0, -h / 3.0, 0.0) * scale,
          DVec3::new(0.0, 2.0 * h / 3.0, 0.0) * scale,
        )
      }
      ShapeVariant::Tetrahedron => {
        let apex = 6.0_f64.sqrt() / 2.0;
        let base_y = -(6.0_f64.sqrt()) / 6.0;
        let r = 3.0_f64.sqrt() / 3.0;
        Primitive::tetrahedron(
          DVec3::new(0.0, apex, 0.0) * scale,
          DVec3::new(-1.0, base_y, r) * scale,
          DVec3::new(1.0, base_y, r) * scale,
          DVec3::new(0.0, base_y, -2.0 * r) * scale,
        )
      }
    }
  }
}

/// Linear RGB colour in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
  pub r: f32,
  pub g: f32,
  pub b: f32,
}

impl Rgb {
  pub const fn new(r: f32, g: f32, b: f32) -> Self {
    Self { r, g, b }
  }

  /// Build from a `0xRRGGBB` integer.
  pub fn from_hex(hex: u32) -> Self {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    Self::new(channel(16), channel(8), channel(0))
  }

  /// Pack back into `0xRRGGBB`, rounding each channel.
  pub fn to_hex(self) -> u32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
  }
}

impl Default for Rgb {
  fn default() -> Self {
    Self::from_hex(DEFAULT_COLOR)
  }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: Vec3,
  pub max: Vec3,
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::INFINITY,
      max: Vec3::NEG_INFINITY,
    }
  }

  pub fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Flat, non-indexed triangle-list positions (x, y, z per vertex).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
  positions: Vec<f32>,
  bounds: MinMaxAABB,
}

impl MeshBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Wrap packed positions, computing their bounds.
  pub fn from_positions(positions: Vec<f32>) -> Self {
    debug_assert_eq!(positions.len() % FLOATS_PER_VERTEX, 0);
    let mut bounds = MinMaxAABB::empty();
    for v in positions.chunks_exact(FLOATS_PER_VERTEX) {
      bounds.encapsulate(Vec3::new(v[0], v[1], v[2]));
    }
    Self { positions, bounds }
  }

  #[inline]
  pub fn positions(&self) -> &[f32] {
    &self.positions
  }

  /// Bounding box of every stored vertex.
  #[inline]
  pub fn bounds(&self) -> MinMaxAABB {
    self.bounds
  }

  pub fn vertex_count(&self) -> usize {
    self.positions.len() / FLOATS_PER_VERTEX
  }

  pub fn triangle_count(&self) -> usize {
    self.vertex_count() / 3
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Heap bytes held by the position data.
  pub fn byte_len(&self) -> usize {
    self.positions.len() * std::mem::size_of::<f32>()
  }

  #[inline]
  pub fn vertex(&self, index: usize) -> Vec3 {
    let i = index * FLOATS_PER_VERTEX;
    Vec3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
  }

  pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
    self
      .positions
      .chunks_exact(FLOATS_PER_VERTEX)
      .map(|v| Vec3::new(v[0], v[1], v[2]))
  }

  /// Release all position data and capacity.
  pub fn release(&mut self) {
    self.positions = Vec::new();
    self.bounds = MinMaxAABB::empty();
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
