use num::{Float, Num};
use std::ops::Sub;

/// A 2D vector generic over any numeric type.
///
/// Used as the local tangent-plane offset of a formation member (meters, `x` north,
/// `y` east) and as a plain coordinate pair, e.g. a `(lat, lon)` tuple in radians
/// while an offset is projected onto the sphere.
///
/// Equality compares both components exactly.
///
/// # Type Parameters
/// * `T` - The functionality for the vector depends on traits implemented by `T`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Vec2D<T> {
    /// The x-component of the vector.
    x: T,
    /// The y-component of the vector.
    y: T,
}

impl<T: Copy> Vec2D<T> {
    /// Creates a new vector with the given x and y components.
    pub const fn new(x: T, y: T) -> Self { Self { x, y } }

    /// Returns the x-component of the vector.
    pub const fn x(&self) -> T { self.x }

    /// Returns the y-component of the vector.
    pub const fn y(&self) -> T { self.y }

    /// Exchanges the two components.
    pub fn swap(&mut self) { std::mem::swap(&mut self.x, &mut self.y); }
}

impl<T: Num + Copy> Vec2D<T> {
    /// Moves the point by `(dx, dy)`.
    pub fn translate(&mut self, dx: T, dy: T) {
        self.x = self.x + dx;
        self.y = self.y + dy;
    }

    /// Scales each component independently.
    ///
    /// # Arguments
    /// * `sx` - Factor applied to `x`.
    /// * `sy` - Factor applied to `y`.
    pub fn scale(&mut self, sx: T, sy: T) {
        self.x = self.x * sx;
        self.y = self.y * sy;
    }
}

impl<T: Float> Vec2D<T> {
    /// Rotates the point around the origin.
    ///
    /// With `x` pointing north and `y` pointing east a positive angle turns
    /// clockwise, which matches a compass heading.
    ///
    /// # Arguments
    /// * `angle` - The rotation angle in radians.
    pub fn rotate(&mut self, angle: T) { self.rotate_around(T::zero(), T::zero(), angle); }

    /// Rotates the point around `(cx, cy)` by `angle` radians.
    pub fn rotate_around(&mut self, cx: T, cy: T, angle: T) {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - cx;
        let dy = self.y - cy;
        self.x = dx * cos - dy * sin + cx;
        self.y = dx * sin + dy * cos + cy;
    }

    /// Euclidean norm of the vector `(0, 0) -> (x, y)`.
    pub fn abs(&self) -> T { self.x.hypot(self.y) }

    /// Manhattan norm of the vector `(0, 0) -> (x, y)`.
    pub fn norm1(&self) -> T { self.x.abs() + self.y.abs() }

    /// Chebyshev (infinity) norm of the vector `(0, 0) -> (x, y)`.
    pub fn norm_inf(&self) -> T { self.x.abs().max(self.y.abs()) }

    /// Computes the Euclidean distance between the current vector and another vector.
    pub fn euclid_distance(&self, other: &Self) -> T { (*self - *other).abs() }
}

impl<T: Num> Sub for Vec2D<T> {
    type Output = Vec2D<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}
