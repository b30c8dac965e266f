//! The ray tracer's scene model: fixed-capacity catalogs of geometry,
//! materials and lights, read-only while a frame renders.

use crate::{
    error::{Error, Result},
    real::Real,
    vector::{Colour, Ray, Vec3},
};

/// Capacity of each catalog.
pub const CATALOG_CAPACITY: usize = 16;

/// Outcome of a ray/geometry query. `Intersection::miss()` is the default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection<R> {
    pub is_hit: bool,
    pub material: usize,
    pub distance: R,
    pub position: Vec3<R>,
    pub normal: Vec3<R>,
}

impl<R: Real> Intersection<R> {
    pub fn miss() -> Self {
        Self {
            is_hit: false,
            material: 0,
            distance: R::ZERO,
            position: Vec3::zero(),
            normal: Vec3::zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry<R> {
    /// Empty catalog slot.
    None,
    Sphere {
        center: Vec3<R>,
        radius: R,
        material: usize,
    },
    /// One-sided plane `normal · p = offset`, visible from the side `normal`
    /// points to.
    Plane {
        normal: Vec3<R>,
        offset: R,
        material: usize,
    },
}

impl<R: Real> Geometry<R> {
    pub fn sphere(center: Vec3<R>, radius: R, material: usize) -> Self {
        Geometry::Sphere {
            center,
            radius,
            material,
        }
    }

    pub fn plane(normal: Vec3<R>, offset: R, material: usize) -> Self {
        Geometry::Plane {
            normal: normal.normalize(),
            offset,
            material,
        }
    }

    fn material(&self) -> Option<usize> {
        match self {
            Geometry::None => None,
            Geometry::Sphere { material, .. } | Geometry::Plane { material, .. } => Some(*material),
        }
    }

    pub fn intersect(&self, ray: &Ray<R>) -> Intersection<R> {
        match *self {
            Geometry::None => Intersection::miss(),
            Geometry::Sphere {
                center,
                radius,
                material,
            } => {
                let v = ray.origin - center;
                let a0 = v.sqr_length() - radius * radius;
                let d_dot_v = ray.direction.dot(v);

                // Centre behind the origin: nothing ahead to hit.
                if d_dot_v > R::ZERO {
                    return Intersection::miss();
                }

                let discr = d_dot_v * d_dot_v - a0;
                if discr < R::ZERO {
                    return Intersection::miss();
                }

                // Near root first, far root when the origin is inside.
                let root = discr.sqrt();
                let distance = if -d_dot_v - root > R::ZERO {
                    -d_dot_v - root
                } else {
                    -d_dot_v + root
                };
                if distance <= R::ZERO {
                    return Intersection::miss();
                }

                let position = ray.at(distance);
                Intersection {
                    is_hit: true,
                    material,
                    distance,
                    position,
                    normal: (position - center) / radius,
                }
            }
            Geometry::Plane {
                normal,
                offset,
                material,
            } => {
                let a = ray.direction.dot(normal);
                if a >= R::ZERO {
                    return Intersection::miss();
                }

                let b = normal.dot(ray.origin - normal * offset);
                let distance = -b / a;
                if distance <= R::ZERO {
                    return Intersection::miss();
                }

                Intersection {
                    is_hit: true,
                    material,
                    distance,
                    position: ray.at(distance),
                    normal,
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialKind<R> {
    Checker {
        scale: R,
    },
    Phong {
        diffuse: Colour<R>,
        specular: Colour<R>,
        shininess: R,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material<R> {
    pub kind: MaterialKind<R>,
    /// Share of outgoing light that comes from the mirror bounce, in `[0, 1]`.
    pub reflectiveness: R,
}

impl<R: Real> Material<R> {
    pub fn checker(scale: R, reflectiveness: R) -> Self {
        Self {
            kind: MaterialKind::Checker { scale },
            reflectiveness,
        }
    }

    pub fn phong(diffuse: Colour<R>, specular: Colour<R>, shininess: R, reflectiveness: R) -> Self {
        Self {
            kind: MaterialKind::Phong {
                diffuse,
                specular,
                shininess,
            },
            reflectiveness,
        }
    }

    /// Light reflected towards the viewer of `ray` by a surface lit by `light`.
    pub fn sample(
        &self,
        ray: &Ray<R>,
        position: Vec3<R>,
        normal: Vec3<R>,
        light: &LightSample<R>,
    ) -> Colour<R> {
        match self.kind {
            MaterialKind::Checker { scale } => {
                let cell = ((position.x * scale).floor() + (position.z * scale).floor()).abs();
                let odd = (cell.to_f64() as i64) % 2 == 1;
                let checker = if odd { light.energy } else { Colour::black() };
                checker * normal.dot(light.direction).max(R::ZERO)
            }
            MaterialKind::Phong {
                diffuse,
                specular,
                shininess,
            } => {
                let n_dot_l = normal.dot(light.direction);
                let half = (light.direction - ray.direction).normalize();
                let n_dot_h = normal.dot(half);

                let diffuse_term = diffuse * n_dot_l.max(R::ZERO);
                let specular_term = specular * n_dot_h.max(R::ZERO).powf(shininess);
                light.energy * (diffuse_term + specular_term)
            }
        }
    }
}

/// Unit direction towards a light and the energy arriving along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSample<R> {
    pub direction: Vec3<R>,
    pub energy: Colour<R>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight<R> {
    pub intensity: Colour<R>,
    pub position: Vec3<R>,
}

/// Offset applied along the surface normal to the origin of secondary rays.
pub(crate) fn surface_bias<R: Real>() -> R {
    R::from_f64(1e-4)
}

impl<R: Real> PointLight<R> {
    /// Light reaching `position`, or `None` if something is in the way.
    /// Falls off with the inverse square of the distance.
    pub fn sample(
        &self,
        scene: &Scene<R>,
        position: Vec3<R>,
        normal: Vec3<R>,
    ) -> Option<LightSample<R>> {
        let delta = self.position - position;
        let rr = delta.sqr_length();
        let r = rr.sqrt();
        let direction = delta / r;

        let shadow_ray = Ray::new(position + normal * surface_bias(), direction);
        let blocker = scene.intersect(&shadow_ray);
        if blocker.is_hit && blocker.distance < r {
            return None;
        }

        Some(LightSample {
            direction,
            energy: self.intensity * (R::ONE / rr),
        })
    }
}

/// Geometry, materials and lights for one scene.
#[derive(Clone, Debug)]
pub struct Scene<R> {
    geometries: [Geometry<R>; CATALOG_CAPACITY],
    geometry_count: usize,
    materials: [Option<Material<R>>; CATALOG_CAPACITY],
    material_count: usize,
    lights: [Option<PointLight<R>>; CATALOG_CAPACITY],
    light_count: usize,
}

impl<R: Real> Scene<R> {
    pub fn empty() -> Self {
        Self {
            geometries: [Geometry::None; CATALOG_CAPACITY],
            geometry_count: 0,
            materials: [None; CATALOG_CAPACITY],
            material_count: 0,
            lights: [None; CATALOG_CAPACITY],
            light_count: 0,
        }
    }

    /// Plane floor under a red and a blue sphere, lit by one white point light.
    pub fn default_scene() -> Result<Self> {
        let mut scene = Self::empty();

        let red = scene.add_material(Material::phong(
            Colour::red(),
            Colour::white(),
            R::from_f64(16.0),
            R::from_f64(0.25),
        ))?;
        let blue = scene.add_material(Material::phong(
            Colour::blue(),
            Colour::white(),
            R::from_f64(16.0),
            R::from_f64(0.25),
        ))?;
        let floor = scene.add_material(Material::checker(R::from_f64(0.1), R::from_f64(0.5)))?;

        scene.add_geometry(Geometry::plane(Vec3::from_f64(0.0, 1.0, 0.0), R::ZERO, floor))?;
        scene.add_geometry(Geometry::sphere(
            Vec3::from_f64(-15.0, 15.0, -10.0),
            R::from_f64(15.0),
            red,
        ))?;
        scene.add_geometry(Geometry::sphere(
            Vec3::from_f64(12.0, 10.0, -10.0),
            R::from_f64(10.0),
            blue,
        ))?;

        scene.add_light(PointLight {
            intensity: Colour::white() * R::from_f64(1000.0),
            position: Vec3::from_f64(20.0, 30.0, 10.0),
        })?;

        Ok(scene)
    }

    pub fn add_material(&mut self, material: Material<R>) -> Result<usize> {
        if self.material_count == CATALOG_CAPACITY {
            return Err(Error::CatalogFull {
                kind: "material",
                capacity: CATALOG_CAPACITY,
            });
        }
        let index = self.material_count;
        self.materials[index] = Some(material);
        self.material_count += 1;
        Ok(index)
    }

    /// Geometry may only reference materials that are already in the catalog.
    pub fn add_geometry(&mut self, geometry: Geometry<R>) -> Result<usize> {
        if self.geometry_count == CATALOG_CAPACITY {
            return Err(Error::CatalogFull {
                kind: "geometry",
                capacity: CATALOG_CAPACITY,
            });
        }
        if let Some(index) = geometry.material() {
            if index >= self.material_count {
                return Err(Error::UnknownMaterial {
                    index,
                    count: self.material_count,
                });
            }
        }
        let index = self.geometry_count;
        self.geometries[index] = geometry;
        self.geometry_count += 1;
        Ok(index)
    }

    pub fn add_light(&mut self, light: PointLight<R>) -> Result<usize> {
        if self.light_count == CATALOG_CAPACITY {
            return Err(Error::CatalogFull {
                kind: "light",
                capacity: CATALOG_CAPACITY,
            });
        }
        let index = self.light_count;
        self.lights[index] = Some(light);
        self.light_count += 1;
        Ok(index)
    }

    pub fn geometries(&self) -> &[Geometry<R>] {
        &self.geometries[..self.geometry_count]
    }

    pub fn lights(&self) -> impl Iterator<Item = &PointLight<R>> {
        self.lights[..self.light_count].iter().flatten()
    }

    pub fn material(&self, index: usize) -> Option<&Material<R>> {
        self.materials.get(index).and_then(Option::as_ref)
    }

    /// Nearest hit in front of the ray's origin.
    ///
    /// Equally near hits resolve to the geometry added first.
    pub fn intersect(&self, ray: &Ray<R>) -> Intersection<R> {
        let mut min_distance = R::INFINITY;
        let mut nearest = Intersection::miss();

        for geometry in self.geometries() {
            let result = geometry.intersect(ray);
            if result.is_hit && result.distance > R::ZERO && result.distance < min_distance {
                min_distance = result.distance;
                nearest = result;
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray<f64> {
        Ray::new(
            Vec3::new(origin.0, origin.1, origin.2),
            Vec3::new(direction.0, direction.1, direction.2).normalize(),
        )
    }

    #[test]
    fn ray_at_sphere_centre_hits_front_surface() {
        let sphere = Geometry::sphere(Vec3::new(0.0, 0.0, -10.0), 3.0, 0);
        let hit = sphere.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)));

        assert!(hit.is_hit);
        assert!((hit.distance - 7.0).abs() < 1e-12, "distance {}", hit.distance);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let sphere = Geometry::sphere(Vec3::new(0.0, 0.0, 10.0), 3.0, 0);
        assert!(!sphere.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0))).is_hit);
    }

    #[test]
    fn sphere_off_axis_is_missed() {
        let sphere = Geometry::sphere(Vec3::new(5.0, 0.0, -10.0), 1.0, 0);
        assert!(!sphere.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0))).is_hit);
    }

    #[test]
    fn plane_is_one_sided() {
        let plane = Geometry::plane(Vec3::new(0.0, 1.0, 0.0), 0.0, 0);

        let parallel = plane.intersect(&ray((0.0, 1.0, 0.0), (1.0, 0.0, 0.0)));
        assert!(!parallel.is_hit);

        let from_below = plane.intersect(&ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0)));
        assert!(!from_below.is_hit);

        let from_above = plane.intersect(&ray((0.0, 2.0, 0.0), (0.0, -1.0, 0.0)));
        assert!(from_above.is_hit);
        assert!((from_above.distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn origin_inside_sphere_hits_far_side() {
        let sphere = Geometry::sphere(Vec3::zero(), 5.0, 0);
        let hit = sphere.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)));

        assert!(hit.is_hit);
        assert!((hit.distance - 5.0).abs() < 1e-12, "distance {}", hit.distance);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);

        let mut scene = Scene::<f64>::empty();
        let m = scene.add_material(Material::checker(1.0, 0.0)).unwrap();
        scene.add_geometry(Geometry::sphere(Vec3::zero(), 5.0, m)).unwrap();
        let hit = scene.intersect(&ray((1.0, 0.0, 0.0), (0.0, 0.0, -1.0)));
        assert!(hit.is_hit);
        assert!(hit.distance > 0.0);
    }

    #[test]
    fn plane_behind_origin_is_missed() {
        let plane = Geometry::plane(Vec3::new(0.0, 1.0, 0.0), 0.0, 0);
        let hit = plane.intersect(&ray((0.0, -1.0, 0.0), (0.0, -1.0, 0.0)));
        assert!(!hit.is_hit);
    }

    #[test]
    fn offset_plane_moves_along_normal() {
        let plane = Geometry::plane(Vec3::new(0.0, 2.0, 0.0), 3.0, 0);
        let hit = plane.intersect(&ray((0.0, 10.0, 0.0), (0.0, -1.0, 0.0)));
        assert!((hit.distance - 7.0).abs() < 1e-12);
        assert!((hit.position.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_distances_pick_first_geometry() {
        let mut scene = Scene::<f64>::empty();
        let first = scene.add_material(Material::checker(1.0, 0.0)).unwrap();
        let second = scene.add_material(Material::checker(2.0, 0.0)).unwrap();
        scene
            .add_geometry(Geometry::plane(Vec3::new(0.0, 1.0, 0.0), 0.0, first))
            .unwrap();
        scene
            .add_geometry(Geometry::plane(Vec3::new(0.0, 1.0, 0.0), 0.0, second))
            .unwrap();

        let hit = scene.intersect(&ray((0.0, 5.0, 0.0), (0.0, -1.0, 0.0)));
        assert!(hit.is_hit);
        assert_eq!(hit.material, first);
    }

    #[test]
    fn nearest_geometry_wins() {
        let mut scene = Scene::<f64>::empty();
        let m = scene.add_material(Material::checker(1.0, 0.0)).unwrap();
        scene
            .add_geometry(Geometry::sphere(Vec3::new(0.0, 0.0, -20.0), 1.0, m))
            .unwrap();
        scene
            .add_geometry(Geometry::sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, m))
            .unwrap();

        let hit = scene.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)));
        assert!((hit.distance - 9.0).abs() < 1e-12);
    }

    #[test]
    fn empty_scene_misses() {
        let scene = Scene::<f32>::empty();
        let hit = scene.intersect(&Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(hit, Intersection::miss());
    }

    #[test]
    fn catalogs_are_bounded() {
        let mut scene = Scene::<f32>::empty();
        for _ in 0..CATALOG_CAPACITY {
            scene.add_material(Material::checker(1.0, 0.0)).unwrap();
        }
        assert!(matches!(
            scene.add_material(Material::checker(1.0, 0.0)),
            Err(Error::CatalogFull { kind: "material", .. })
        ));
    }

    #[test]
    fn geometry_needs_existing_material() {
        let mut scene = Scene::<f32>::empty();
        let result = scene.add_geometry(Geometry::sphere(Vec3::zero(), 1.0, 0));
        assert!(matches!(
            result,
            Err(Error::UnknownMaterial { index: 0, count: 0 })
        ));
    }

    #[test]
    fn blocked_light_gives_no_sample() {
        let mut scene = Scene::<f64>::empty();
        let m = scene.add_material(Material::checker(1.0, 0.0)).unwrap();
        scene
            .add_geometry(Geometry::sphere(Vec3::new(0.0, 5.0, 0.0), 1.0, m))
            .unwrap();
        let light = PointLight {
            intensity: Colour::white() * 100.0,
            position: Vec3::new(0.0, 10.0, 0.0),
        };
        let up = Vec3::new(0.0, 1.0, 0.0);

        assert!(light.sample(&scene, Vec3::zero(), up).is_none());

        let beside = light
            .sample(&scene, Vec3::new(10.0, 0.0, 0.0), up)
            .expect("unobstructed");
        assert!((beside.energy.r - 100.0 / 200.0).abs() < 1e-12);
    }

    #[test]
    fn geometry_beyond_light_does_not_shadow() {
        let mut scene = Scene::<f64>::empty();
        let m = scene.add_material(Material::checker(1.0, 0.0)).unwrap();
        scene
            .add_geometry(Geometry::sphere(Vec3::new(0.0, 20.0, 0.0), 1.0, m))
            .unwrap();
        // Ceiling facing down, above the light.
        scene
            .add_geometry(Geometry::plane(Vec3::new(0.0, -1.0, 0.0), -15.0, m))
            .unwrap();
        let light = PointLight {
            intensity: Colour::white() * 100.0,
            position: Vec3::new(0.0, 10.0, 0.0),
        };
        let up = Vec3::new(0.0, 1.0, 0.0);

        // The shadow ray does reach both blockers, just past the light.
        let shadow_ray = Ray::new(up * surface_bias::<f64>(), up);
        let behind = scene.intersect(&shadow_ray);
        assert!(behind.is_hit && behind.distance > 10.0);

        let sample = light
            .sample(&scene, Vec3::zero(), up)
            .expect("blockers lie past the light");
        assert!((sample.energy.r - 1.0).abs() < 1e-12);
        assert_eq!(sample.direction, up);
    }

    #[test]
    fn checker_alternates_by_cell() {
        let material = Material::<f64>::checker(1.0, 0.0);
        let light = LightSample {
            direction: Vec3::new(0.0, 1.0, 0.0),
            energy: Colour::white(),
        };
        let ray = ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0));
        let n = Vec3::new(0.0, 1.0, 0.0);

        let even = material.sample(&ray, Vec3::new(0.5, 0.0, 0.5), n, &light);
        let odd = material.sample(&ray, Vec3::new(1.5, 0.0, 0.5), n, &light);
        let negative_odd = material.sample(&ray, Vec3::new(-0.5, 0.0, 0.5), n, &light);
        assert_eq!(even, Colour::black());
        assert_eq!(odd, Colour::white());
        assert_eq!(negative_odd, Colour::white());
    }

    #[test]
    fn phong_head_on_is_diffuse_plus_specular() {
        let material = Material::<f64>::phong(Colour::red(), Colour::white(), 16.0, 0.0);
        let light = LightSample {
            direction: Vec3::new(0.0, 0.0, 1.0),
            energy: Colour::white() * 0.5,
        };
        let view = ray((0.0, 0.0, 5.0), (0.0, 0.0, -1.0));
        let colour = material.sample(&view, Vec3::zero(), Vec3::new(0.0, 0.0, 1.0), &light);
        assert!((colour.r - 1.0).abs() < 1e-12);
        assert!((colour.g - 0.5).abs() < 1e-12);
        assert!((colour.b - 0.5).abs() < 1e-12);
    }
}
