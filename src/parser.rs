//! Scene-file and material-library parser: a line-based Wavefront-style text
//! format plus a companion material library.

use std::collections::HashMap;
use std::path::Path;

use crate::error::SceneError;
use crate::geometry::{Sphere, Triangle};
use crate::material::{Albedo, Material};
use crate::math::{Point3, Vec3};
use crate::scene::{Light, MeshTriangleObject, Scene, SphereObject};

/// Resolves a 1-based, possibly-negative OBJ-style index against a running
/// element count. Negative indices count from the end of the list so far.
fn resolve_index(idx: i64, count: usize) -> i64 {
    if idx < 0 {
        count as i64 + idx
    } else {
        idx - 1
    }
}

struct FaceCorner {
    vertex: i64,
    normal: Option<i64>,
}

fn parse_face_corner(path: &str, line_no: usize, token: &str) -> Result<FaceCorner, SceneError> {
    let mut parts = token.split('/');
    let v = parts.next().unwrap_or("");
    let _vt = parts.next();
    let vn = parts.next();

    let vertex = v
        .parse::<i64>()
        .map_err(|_| SceneError::MalformedNumber {
            path: path.to_string(),
            line: line_no,
            token: token.to_string(),
        })?;

    let normal = match vn {
        Some(s) if !s.is_empty() => Some(s.parse::<i64>().map_err(|_| SceneError::MalformedNumber {
            path: path.to_string(),
            line: line_no,
            token: token.to_string(),
        })?),
        _ => None,
    };

    Ok(FaceCorner { vertex, normal })
}

fn parse_vec3(path: &str, line_no: usize, tokens: &[&str]) -> Result<Vec3, SceneError> {
    let parse = |t: &str| -> Result<f64, SceneError> {
        t.parse::<f64>().map_err(|_| SceneError::MalformedNumber {
            path: path.to_string(),
            line: line_no,
            token: t.to_string(),
        })
    };
    Ok(Vec3::new(
        parse(tokens.first().copied().unwrap_or(""))?,
        parse(tokens.get(1).copied().unwrap_or(""))?,
        parse(tokens.get(2).copied().unwrap_or(""))?,
    ))
}

fn parse_f64(path: &str, line_no: usize, token: &str) -> Result<f64, SceneError> {
    token.parse::<f64>().map_err(|_| SceneError::MalformedNumber {
        path: path.to_string(),
        line: line_no,
        token: token.to_string(),
    })
}

/// Parses a material library: `newmtl`, `Ka`, `Kd`, `Ks`, `Ke`, `Ns`, `Ni`,
/// `al`. Unknown keywords are ignored.
pub fn parse_materials(path: &Path) -> Result<HashMap<String, Material>, SceneError> {
    let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let path_str = path.display().to_string();

    let mut materials = HashMap::new();
    let mut current: Option<Material> = None;

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let rest: Vec<&str> = tokens.collect();

        match directive {
            "newmtl" => {
                if let Some(m) = current.take() {
                    materials.insert(m.name.clone(), m);
                }
                let name = rest.first().copied().unwrap_or("").to_string();
                current = Some(Material::new(name));
            }
            "Ka" => {
                if let Some(m) = current.as_mut() {
                    m.ambient_color = parse_vec3(&path_str, line_no, &rest)?;
                }
            }
            "Kd" => {
                if let Some(m) = current.as_mut() {
                    m.diffuse_color = parse_vec3(&path_str, line_no, &rest)?;
                }
            }
            "Ks" => {
                if let Some(m) = current.as_mut() {
                    m.specular_color = parse_vec3(&path_str, line_no, &rest)?;
                }
            }
            "Ke" => {
                if let Some(m) = current.as_mut() {
                    m.emission_intensity = parse_vec3(&path_str, line_no, &rest)?;
                }
            }
            "Ns" => {
                if let Some(m) = current.as_mut() {
                    m.specular_exponent = parse_f64(&path_str, line_no, rest.first().copied().unwrap_or(""))?;
                }
            }
            "Ni" => {
                if let Some(m) = current.as_mut() {
                    m.refraction_index = parse_f64(&path_str, line_no, rest.first().copied().unwrap_or(""))?;
                }
            }
            "al" => {
                if let Some(m) = current.as_mut() {
                    let v = parse_vec3(&path_str, line_no, &rest)?;
                    m.albedo = Albedo::new(v.x, v.y, v.z);
                }
            }
            _ => continue,
        }
    }

    if let Some(m) = current.take() {
        materials.insert(m.name.clone(), m);
    }

    Ok(materials)
}

/// Parses the scene file and its companion material library into a `Scene`.
pub fn parse_scene(path: &Path) -> Result<Scene, SceneError> {
    let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let path_str = path.display().to_string();

    let mut vertices: Vec<Point3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut material_lib: Option<String> = None;
    let mut current_material = String::new();

    let mut face_meta: Vec<(usize, String, Vec<(Point3, Option<Vec3>)>)> = Vec::new();
    let mut sphere_meta: Vec<(String, Sphere)> = Vec::new();
    let mut lights: Vec<Light> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let rest: Vec<&str> = tokens.collect();

        match directive {
            "mtllib" => {
                material_lib = rest.first().map(|s| s.to_string());
            }
            "v" => {
                vertices.push(parse_vec3(&path_str, line_no, &rest)?);
            }
            "vn" => {
                normals.push(parse_vec3(&path_str, line_no, &rest)?);
            }
            "usemtl" => {
                current_material = rest.first().copied().unwrap_or("").to_string();
            }
            "f" => {
                if rest.len() < 3 {
                    return Err(SceneError::DegenerateFace {
                        path: path_str,
                        line: line_no,
                    });
                }
                let corners = rest
                    .iter()
                    .map(|t| parse_face_corner(&path_str, line_no, t))
                    .collect::<Result<Vec<_>, _>>()?;

                // Indices are resolved here, against the running vertex/normal
                // counts at this line, not against the file's final totals —
                // negative indices count from the end of what has been seen
                // so far.
                let mut resolved = Vec::with_capacity(corners.len());
                for corner in &corners {
                    let v_idx = resolve_index(corner.vertex, vertices.len());
                    let v_idx = usize::try_from(v_idx).map_err(|_| SceneError::VertexIndexOutOfRange {
                        path: path_str.clone(),
                        line: line_no,
                        index: corner.vertex,
                        count: vertices.len(),
                    })?;
                    let position = *vertices.get(v_idx).ok_or_else(|| SceneError::VertexIndexOutOfRange {
                        path: path_str.clone(),
                        line: line_no,
                        index: corner.vertex,
                        count: vertices.len(),
                    })?;

                    let normal = match corner.normal {
                        Some(n) => {
                            let n_idx = resolve_index(n, normals.len());
                            let n_idx = usize::try_from(n_idx).map_err(|_| SceneError::VertexIndexOutOfRange {
                                path: path_str.clone(),
                                line: line_no,
                                index: n,
                                count: normals.len(),
                            })?;
                            Some(*normals.get(n_idx).ok_or_else(|| SceneError::VertexIndexOutOfRange {
                                path: path_str.clone(),
                                line: line_no,
                                index: n,
                                count: normals.len(),
                            })?)
                        }
                        None => None,
                    };

                    resolved.push((position, normal));
                }

                face_meta.push((line_no, current_material.clone(), resolved));
            }
            "S" => {
                if rest.len() < 4 {
                    return Err(SceneError::MalformedNumber {
                        path: path_str,
                        line: line_no,
                        token: line.to_string(),
                    });
                }
                let center = parse_vec3(&path_str, line_no, &rest[0..3])?;
                let radius = parse_f64(&path_str, line_no, rest[3])?;
                sphere_meta.push((current_material.clone(), Sphere::new(center, radius)));
            }
            "P" => {
                if rest.len() < 6 {
                    return Err(SceneError::MalformedNumber {
                        path: path_str,
                        line: line_no,
                        token: line.to_string(),
                    });
                }
                let position = parse_vec3(&path_str, line_no, &rest[0..3])?;
                let intensity = parse_vec3(&path_str, line_no, &rest[3..6])?;
                lights.push(Light::new(position, intensity));
            }
            _ => continue,
        }
    }

    let materials = match material_lib {
        Some(name) => {
            let mtl_path = path.parent().unwrap_or_else(|| Path::new(".")).join(name);
            parse_materials(&mtl_path)?
        }
        None => HashMap::new(),
    };

    let mut scene = Scene::new(materials);

    for (line_no, material_name, corners) in &face_meta {
        let line_no = *line_no;

        if scene.material(material_name).is_none() {
            return Err(SceneError::UnknownMaterial {
                path: path_str.clone(),
                line: line_no,
                name: material_name.clone(),
            });
        }

        for i in 1..corners.len() - 1 {
            let picked = [corners[0], corners[i], corners[i + 1]];
            let positions = [picked[0].0, picked[1].0, picked[2].0];
            let vertex_normals = [picked[0].1, picked[1].1, picked[2].1];

            let triangle = Triangle::new(positions[0], positions[1], positions[2]);
            scene
                .triangles
                .push(MeshTriangleObject::new(triangle, material_name.clone(), vertex_normals));
        }
    }

    for (material_name, sphere) in sphere_meta {
        if scene.material(&material_name).is_none() {
            return Err(SceneError::UnknownMaterial {
                path: path_str.clone(),
                line: 0,
                name: material_name,
            });
        }
        scene.spheres.push(SphereObject::new(sphere, material_name));
    }

    scene.lights = lights;

    Ok(scene)
}
