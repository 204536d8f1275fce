//! Graphics Foundations

use half::f16;

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2<T> {
	pub x: T,
	pub y: T,
}

impl<T> Vec2<T> {
	pub fn new(x: T, y: T) -> Self {
		Self { x, y }
	}
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3<T> {
	pub x: T,
	pub y: T,
	pub z: T,
}

impl<T> Vec3<T> {
	pub fn new(x: T, y: T, z: T) -> Self {
		Self { x, y, z }
	}
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4<T> {
	pub x: T,
	pub y: T,
	pub z: T,
	pub w: T,
}

impl<T> Vec4<T> {
	pub fn new(x: T, y: T, z: T, w: T) -> Self {
		Self { x, y, z, w }
	}
}

pub type Vec2h = Vec2<f16>;
pub type Vec2f = Vec2<f32>;
pub type Vec2d = Vec2<f64>;
pub type Vec2i = Vec2<i32>;

pub type Vec3h = Vec3<f16>;
pub type Vec3f = Vec3<f32>;
pub type Vec3d = Vec3<f64>;
pub type Vec3i = Vec3<i32>;

pub type Vec4h = Vec4<f16>;
pub type Vec4f = Vec4<f32>;
pub type Vec4d = Vec4<f64>;
pub type Vec4i = Vec4<i32>;

impl<T: Copy + Mul<Output = T>> Mul<T> for Vec2<T> {
	type Output = Self;

	fn mul(self, rhs: T) -> Self {
		Self::new(self.x * rhs, self.y * rhs)
	}
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vec3<T> {
	type Output = Self;

	fn mul(self, rhs: T) -> Self {
		Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
	}
}

impl<T: Copy + Mul<Output = T> + MulAssign> MulAssign<T> for Vec3<T> {
	fn mul_assign(&mut self, rhs: T) {
		self.x *= rhs;
		self.y *= rhs;
		self.z *= rhs;
	}
}

impl<T: Copy + Add<Output = T>> Add for Vec3<T> {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
	}
}

impl<T: Copy + Add<Output = T> + AddAssign> AddAssign for Vec3<T> {
	fn add_assign(&mut self, rhs: Self) {
		self.x += rhs.x;
		self.y += rhs.y;
		self.z += rhs.z;
	}
}

impl<T: Copy + Sub<Output = T>> Sub for Vec3<T> {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
	}
}

impl From<Vec3f> for Vec3d {
	fn from(v: Vec3f) -> Self {
		Self::new(v.x as f64, v.y as f64, v.z as f64)
	}
}

impl From<Vec3h> for Vec3d {
	fn from(v: Vec3h) -> Self {
		Self::new(v.x.into(), v.y.into(), v.z.into())
	}
}

impl From<Vec2f> for Vec2d {
	fn from(v: Vec2f) -> Self {
		Self::new(v.x as f64, v.y as f64)
	}
}

impl From<Vec2h> for Vec2d {
	fn from(v: Vec2h) -> Self {
		Self::new(v.x.into(), v.y.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scale_extent_corner() {
		let corner = Vec3f::new(-1.0, -1.0, -1.0) * 2.0;
		assert_eq!(corner, Vec3f::new(-2.0, -2.0, -2.0));
	}
}
