//! Core types for spherical polygon assembly.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

/// A point on the unit sphere, represented as a 3D unit vector of doubles.
///
/// This type provides a small `#[repr(C)]` representation with a stable layout.
/// Points are assumed to be on (or near) the unit sphere; the crate does not
/// normalize inputs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UnitVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl UnitVec3 {
    /// Create a new unit vector.
    ///
    /// Note: This does NOT normalize the input. The caller is responsible
    /// for ensuring the vector is on the unit sphere.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create from any type implementing `UnitVec3Like`.
    #[inline]
    pub fn from_like<P: UnitVec3Like>(p: &P) -> Self {
        Self::new(p.x(), p.y(), p.z())
    }

    /// Create a unit vector from latitude and longitude in degrees.
    #[inline]
    pub fn from_lat_lng_degrees(lat: f64, lng: f64) -> Self {
        let (lat, lng) = (lat.to_radians(), lng.to_radians());
        Self::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
    }

    /// Convert to a `glam::DVec3`.
    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Create from a `glam::DVec3`.
    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Compute the dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Compute the squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Compute the length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalize the vector.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len)
        } else {
            self
        }
    }
}

impl From<[f64; 3]> for UnitVec3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<UnitVec3> for [f64; 3] {
    #[inline]
    fn from(v: UnitVec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl From<DVec3> for UnitVec3 {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::from_dvec3(v)
    }
}

impl From<UnitVec3> for DVec3 {
    #[inline]
    fn from(v: UnitVec3) -> DVec3 {
        v.to_dvec3()
    }
}

/// Trait for types that can be used as input points.
///
/// This allows zero-copy input from various math libraries.
pub trait UnitVec3Like {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;
}

impl UnitVec3Like for UnitVec3 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
    #[inline]
    fn z(&self) -> f64 {
        self.z
    }
}

impl UnitVec3Like for [f64; 3] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
    #[inline]
    fn z(&self) -> f64 {
        self[2]
    }
}

impl UnitVec3Like for (f64, f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
    #[inline]
    fn z(&self) -> f64 {
        self.2
    }
}

impl UnitVec3Like for DVec3 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
    #[inline]
    fn z(&self) -> f64 {
        self.z
    }
}
