//! Ray–primitive intersection kernel and the shared geometric operations
//! (reflection, refraction, barycentric interpolation) the shading evaluator
//! builds on.

use crate::math::{Point3, Ray, Vec3};

/// Parallel-ray cull tolerance inside the Möller–Trumbore triangle test.
pub const TRIANGLE_EPS: f64 = 1e-7;

/// Surface-offset bias applied to secondary ray origins to avoid self-hits.
pub const SURFACE_BIAS: f64 = 1e-6;

// ─── Primitives ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
}

impl Sphere {
    pub const fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Triangle {
    pub const fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Half the magnitude of the cross product of the two edges from `a`.
    pub fn area(&self) -> f64 {
        (self.b - self.a).cross(self.c - self.a).length() / 2.0
    }
}

// ─── Intersection record ────────────────────────────────────────────────────

/// A hit record: position on the primitive, unit normal oriented against the
/// incoming ray, and the distance along the ray. Ordered by `distance`.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    pub position: Point3,
    pub normal: Vec3,
    pub distance: f64,
}

impl Intersection {
    /// Normalizes `normal` on construction — callers pass the raw geometric
    /// normal (already oriented against the ray) and this finishes the unit
    /// length invariant.
    pub fn new(position: Point3, normal: Vec3, distance: f64) -> Self {
        Self {
            position,
            normal: normal.normalized(),
            distance,
        }
    }
}

// ─── Geometric operations ───────────────────────────────────────────────────

/// `d − 2·(d·n)·n`. `n` must be unit; if `d` is unit the result is unit.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * 2.0 * d.dot(n)
}

/// Snell's law refraction. `eta` is `n_from / n_to`; `n` follows the
/// intersection-record convention (oriented against the incoming ray).
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(d: Vec3, n: Vec3, eta: f64) -> Option<Vec3> {
    let cos_theta = d.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos_theta * cos_theta);
    if k < 0.0 {
        return None;
    }
    Some(d * eta - n * (eta * cos_theta + k.sqrt()))
}

/// Returns `(gamma, alpha, beta)` such that `p = gamma*a + alpha*b + beta*c`.
/// Component 0 pairs with vertex `a`.
pub fn barycentric(triangle: &Triangle, p: Point3) -> (f64, f64, f64) {
    let ab = triangle.b - triangle.a;
    let ac = triangle.c - triangle.a;
    let ap = p - triangle.a;

    let dot_abab = ab.dot(ab);
    let dot_abac = ab.dot(ac);
    let dot_acac = ac.dot(ac);
    let dot_apab = ap.dot(ab);
    let dot_apac = ap.dot(ac);

    let denom = dot_abab * dot_acac - dot_abac * dot_abac;

    let alpha = (dot_acac * dot_apab - dot_abac * dot_apac) / denom;
    let beta = (dot_abab * dot_apac - dot_abac * dot_apab) / denom;
    let gamma = 1.0 - alpha - beta;

    (gamma, alpha, beta)
}

// ─── Intersection kernel ────────────────────────────────────────────────────

/// Ray–sphere intersection: solves `‖O + tD − C‖² = r²`, picks the smallest
/// positive root. No hit if both roots are non-positive.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<Intersection> {
    let oc = ray.origin - sphere.center;
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - sphere.radius * sphere.radius;
    let d = b * b - 4.0 * c;

    if d < 0.0 {
        return None;
    }

    let sqrt_d = d.sqrt();
    let t1 = (-b + sqrt_d) / 2.0;
    let t2 = (-b - sqrt_d) / 2.0;

    let t = if t1 < 0.0 && t2 < 0.0 {
        return None;
    } else if t1 > 0.0 && t2 > 0.0 {
        t1.min(t2)
    } else {
        t1.max(t2)
    };

    let position = ray.at(t);
    let mut normal = position - sphere.center;
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }

    Some(Intersection::new(position, normal, t))
}

/// Möller–Trumbore ray–triangle intersection with a parallel-cull tolerance
/// and a `t > eps` gate against hits behind or on the ray origin.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<Intersection> {
    let edge1 = triangle.b - triangle.a;
    let edge2 = triangle.c - triangle.a;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < TRIANGLE_EPS {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - triangle.a;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t <= TRIANGLE_EPS {
        return None;
    }

    let position = ray.at(t);
    let mut normal = edge1.cross(edge2);
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }

    Some(Intersection::new(position, normal, t))
}
