use crate::Scalar;
use vek::Vec2;

/// Rotates vector counter-clockwise by `angle` radians.
pub fn rotate_vector(vector: Vec2<Scalar>, angle: Scalar) -> Vec2<Scalar> {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(
        vector.x * cos - vector.y * sin,
        vector.x * sin + vector.y * cos,
    )
}

/// Signed angle that rotates the world X axis onto `direction`.
pub fn angle_from_x_axis(direction: Vec2<Scalar>) -> Scalar {
    direction.y.atan2(direction.x)
}

/// Mirrors `vector` against the line orthogonal to unit `normal`.
pub fn reflect_vector(vector: Vec2<Scalar>, normal: Vec2<Scalar>) -> Vec2<Scalar> {
    vector - normal * (2.0 * vector.dot(normal))
}

/// Real roots of `a*x^2 + b*x + c = 0`.
///
/// Negative discriminant coming from rounding errors gets clamped to zero, so
/// nearly tangent equations report a double root instead of no roots at all.
/// Returns `None` only when `a` is zero and equation is not quadratic.
pub fn solve_quadratic(a: Scalar, b: Scalar, c: Scalar) -> Option<[Scalar; 2]> {
    if a == 0.0 {
        return None;
    }
    let discriminant = (b * b - 4.0 * a * c).max(0.0);
    let sign = if b < 0.0 { -1.0 } else { 1.0 };
    let q = -0.5 * (b + sign * discriminant.sqrt());
    if q == 0.0 {
        let root = -b / (2.0 * a);
        return Some([root, root]);
    }
    Some([q / a, c / q])
}
