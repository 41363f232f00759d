//! Sierpinski subdivision engine.
//!
//! Each step replaces a primitive with its half-scale corner copies and drops
//! the centre, which is what makes the result a fractal:
//!
//! ```text
//! Triangle (3 children, central inverted triangle removed):
//!
//!                 C
//!                / \
//!              CA---BC           children, in order:
//!              / \ / \             0: (A,  AB, CA)
//!             A---AB--B            1: (AB, B,  BC)
//!                                  2: (CA, BC, C)
//!
//! Tetrahedron (4 children, central octahedron removed):
//!   0: (A,  AB, AC, AD)
//!   1: (AB, B,  BC, BD)
//!   2: (AC, BC, C,  CD)
//!   3: (AD, BD, CD, D)
//! ```
//!
//! Every generated coordinate is a dyadic-weighted combination of the base
//! corners, so repeated runs are bit-identical under IEEE arithmetic.

use smallvec::{smallvec, SmallVec};

use crate::types::{Point3, Primitive, PrimitiveKind, ShapeVariant};

/// Arithmetic mean of two points.
#[inline(always)]
pub fn midpoint(a: Point3, b: Point3) -> Point3 {
  (a + b) * 0.5
}

/// One subdivision step: the corner children in their fixed order.
pub fn split(primitive: &Primitive) -> SmallVec<[Primitive; 4]> {
  match *primitive {
    Primitive::Triangle([a, b, c]) => {
      let ab = midpoint(a, b);
      let bc = midpoint(b, c);
      let ca = midpoint(c, a);
      smallvec![
        Primitive::triangle(a, ab, ca),
        Primitive::triangle(ab, b, bc),
        Primitive::triangle(ca, bc, c),
      ]
    }
    Primitive::Tetrahedron([a, b, c, d]) => {
      let ab = midpoint(a, b);
      let ac = midpoint(a, c);
      let ad = midpoint(a, d);
      let bc = midpoint(b, c);
      let bd = midpoint(b, d);
      let cd = midpoint(c, d);
      smallvec![
        Primitive::tetrahedron(a, ab, ac, ad),
        Primitive::tetrahedron(ab, b, bc, bd),
        Primitive::tetrahedron(ac, bc, c, cd),
        Primitive::tetrahedron(ad, bd, cd, d),
      ]
    }
  }
}

/// Number of leaves `subdivide` produces for a kind at a depth.
#[inline]
pub fn expected_count(kind: PrimitiveKind, depth: u32) -> usize {
  kind.child_count().pow(depth)
}

/// Subdivide `primitive` `depth` times, returning the leaves depth-first.
///
/// Uses an explicit work stack instead of recursion. Children are pushed in
/// reverse so the pop order matches a recursive walk in fixed child order.
/// Depth is trusted: callers clamp it before reaching this point.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "subdivision::subdivide"))]
pub fn subdivide(primitive: Primitive, depth: u32) -> Vec<Primitive> {
  let kind = primitive.kind();
  let mut leaves = Vec::with_capacity(expected_count(kind, depth));
  let mut stack: Vec<(Primitive, u32)> =
    Vec::with_capacity(depth as usize * (kind.child_count() - 1) + 1);
  stack.push((primitive, depth));

  while let Some((current, remaining)) = stack.pop() {
    if remaining == 0 {
      leaves.push(current);
      continue;
    }
    for child in split(&current).into_iter().rev() {
      stack.push((child, remaining - 1));
    }
  }

  leaves
}

/// Subdivide the base shape of `variant` at the given scale.
pub fn subdivide_variant(variant: ShapeVariant, scale: f64, depth: u32) -> Vec<Primitive> {
  subdivide(variant.base_primitive(scale), depth)
}

#[cfg(test)]
#[path = "subdivision_test.rs"]
mod subdivision_test;
