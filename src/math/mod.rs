//! Fixed-size vector math for 2D/3D/4D geometry.

pub mod vector;

pub use vector::{
    cross, dot, max, min, reflect, refract, Vec2d, Vec2f, Vec2i, Vec2u, Vec3d, Vec3f, Vec3i,
    Vec3u, Vec4d, Vec4f, Vec4i, Vec4u, Vector,
};
