//! Scene model: the material table, mesh-triangle and sphere objects, point
//! lights, and the nearest-hit scene-intersection and shadow queries the
//! shading evaluator is built on.

use std::collections::HashMap;

use crate::geometry::{self, barycentric, Intersection, Sphere, Triangle};
use crate::material::Material;
use crate::math::{Point3, Ray, Vec3};

/// Per-vertex normals attached to a mesh triangle. If all three are present
/// the shading normal is their barycentric interpolation at the hit point;
/// otherwise it falls back to the intersection's geometric normal.
pub type VertexNormals = [Option<Vec3>; 3];

pub struct MeshTriangleObject {
    pub polygon: Triangle,
    pub material: String,
    pub vertex_normals: VertexNormals,
}

impl MeshTriangleObject {
    pub fn new(
        polygon: Triangle,
        material: impl Into<String>,
        vertex_normals: VertexNormals,
    ) -> Self {
        Self {
            polygon,
            material: material.into(),
            vertex_normals,
        }
    }

    fn has_vertex_normals(&self) -> bool {
        self.vertex_normals.iter().all(Option::is_some)
    }
}

pub struct SphereObject {
    pub sphere: Sphere,
    pub material: String,
}

impl SphereObject {
    pub fn new(sphere: Sphere, material: impl Into<String>) -> Self {
        Self {
            sphere,
            material: material.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Point3,
    pub intensity: Vec3,
}

impl Light {
    pub const fn new(position: Point3, intensity: Vec3) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// An immutable scene: a material table keyed by name, mesh triangle and
/// sphere objects that reference materials by name, and point lights.
#[derive(Default)]
pub struct Scene {
    materials: HashMap<String, Material>,
    pub triangles: Vec<MeshTriangleObject>,
    pub spheres: Vec<SphereObject>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(materials: HashMap<String, Material>) -> Self {
        Self {
            materials,
            triangles: Vec::new(),
            spheres: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }
}

/// A nearest-hit query result: the raw intersection record, the material at
/// the hit, and the shading normal (unit length — may differ from the
/// geometric normal when per-vertex normals are interpolated).
pub struct SceneHit<'a> {
    pub intersection: Intersection,
    pub material: &'a Material,
    pub normal: Vec3,
}

fn shading_normal(intersection: &Intersection, object: &MeshTriangleObject) -> Vec3 {
    if !object.has_vertex_normals() {
        return intersection.normal;
    }
    let (gamma, alpha, beta) = barycentric(&object.polygon, intersection.position);
    let weights = [gamma, alpha, beta];
    let mut normal = Vec3::zero();
    for (w, n) in weights.iter().zip(object.vertex_normals.iter()) {
        normal += *n.as_ref().expect("checked by has_vertex_normals") * *w;
    }
    normal.normalized()
}

fn closer<'a>(best: &Option<SceneHit<'a>>, distance: f64) -> bool {
    match best {
        None => true,
        Some(b) => distance < b.intersection.distance,
    }
}

/// Iterates every mesh triangle and sphere, keeping the record with the
/// smallest positive distance. Mesh triangles are checked before spheres;
/// ties are otherwise unobservable and not guaranteed.
pub fn intersect<'a>(ray: &Ray, scene: &'a Scene) -> Option<SceneHit<'a>> {
    let mut best: Option<SceneHit<'a>> = None;

    for object in &scene.triangles {
        if let Some(hit) = geometry::intersect_triangle(ray, &object.polygon) {
            if closer(&best, hit.distance) {
                let normal = shading_normal(&hit, object);
                let material = scene
                    .material(&object.material)
                    .expect("object references a material absent from the scene's table");
                best = Some(SceneHit {
                    intersection: hit,
                    material,
                    normal,
                });
            }
        }
    }

    for object in &scene.spheres {
        if let Some(hit) = geometry::intersect_sphere(ray, &object.sphere) {
            if closer(&best, hit.distance) {
                let normal = hit.normal;
                let material = scene
                    .material(&object.material)
                    .expect("object references a material absent from the scene's table");
                best = Some(SceneHit {
                    intersection: hit,
                    material,
                    normal,
                });
            }
        }
    }

    best
}

/// `ray`'s origin must already be offset off the surface. Shadowed if the
/// nearest hit lies strictly closer than `light_distance + eps`.
pub fn is_shadowed(ray: &Ray, scene: &Scene, light_distance: f64) -> bool {
    const EPS: f64 = 1e-6;
    match intersect(ray, scene) {
        Some(hit) => hit.intersection.distance < light_distance + EPS,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Sphere;

    fn material_table(names: &[&str]) -> HashMap<String, Material> {
        names
            .iter()
            .map(|n| (n.to_string(), Material::new(*n)))
            .collect()
    }

    #[test]
    fn nearest_hit_picks_closer_sphere() {
        let mut scene = Scene::new(material_table(&["a", "b"]));
        scene.spheres.push(SphereObject::new(
            Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0),
            "a",
        ));
        scene.spheres.push(SphereObject::new(
            Sphere::new(Point3::new(0.0, 0.0, -2.0), 1.0),
            "b",
        ));

        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect(&ray, &scene).unwrap();
        assert_eq!(hit.material.name, "b");
        assert!((hit.intersection.distance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn geometric_normal_used_without_vertex_normals() {
        let mut scene = Scene::new(material_table(&["m"]));
        scene.triangles.push(MeshTriangleObject::new(
            Triangle::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
            "m",
            [None, None, None],
        ));
        let ray = Ray::new(Point3::new(0.2, 0.2, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect(&ray, &scene).unwrap();
        assert!((hit.normal.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn interpolated_normal_is_unit_and_barycentric_blend() {
        let mut scene = Scene::new(material_table(&["m"]));
        let n0 = Vec3::new(0.0, 0.0, 1.0);
        let n1 = Vec3::new(0.3, 0.0, 0.95).normalized();
        let n2 = Vec3::new(-0.3, 0.0, 0.95).normalized();
        scene.triangles.push(MeshTriangleObject::new(
            Triangle::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
            "m",
            [Some(n0), Some(n1), Some(n2)],
        ));
        let ray = Ray::new(Point3::new(0.2, 0.2, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect(&ray, &scene).unwrap();
        assert!((hit.normal.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn shadow_ray_hitting_before_light_is_shadowed() {
        let mut scene = Scene::new(material_table(&["m"]));
        scene.spheres.push(SphereObject::new(
            Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0),
            "m",
        ));
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 0.0, -1.0));
        assert!(is_shadowed(&ray, &scene, 10.0));
        assert!(!is_shadowed(&ray, &scene, 1.0));
    }

    #[test]
    fn no_hit_is_not_shadowed() {
        let scene = Scene::new(material_table(&["m"]));
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 0.0, -1.0));
        assert!(!is_shadowed(&ray, &scene, 10.0));
    }
}
