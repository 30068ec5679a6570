//! Fixed-size coordinate primitives.
//!
//! Positions live in index space for graphs built straight from a voxel lattice (unit spacing),
//! or in physical space once a spacing has been applied. Lattice-adjacency checks are only
//! meaningful in the former.

pub type Point = nalgebra::Point3<f64>;
pub type Vector = nalgebra::Vector3<f64>;

pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(a, b)
}

/// Vector pointing from `b` to `a`.
pub fn minus(a: &Point, b: &Point) -> Vector {
    a - b
}

/// Angle in radians between two vectors, in `[0, π]`.
///
/// Returns `None` when either vector has zero length.
pub fn angle(u: &Vector, v: &Vector) -> Option<f64> {
    let nu = u.norm();
    let nv = v.norm();
    if nu == 0.0 || nv == 0.0 {
        return None;
    }
    let cos = (u.dot(v) / (nu * nv)).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// True when `a` and `b` are distinct neighbours in the 26-connected unit lattice.
pub fn are_lattice_adjacent(a: &Point, b: &Point) -> bool {
    let d = a - b;
    a != b && d.iter().all(|c| c.abs() <= 1.0)
}
