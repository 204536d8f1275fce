use super::Object;
use crate::{sdf, usd};

/// Base class for [`usd::Attribute`] and [`usd::Relationship`] scenegraph objects.
#[repr(transparent)]
#[derive(Clone)]
pub struct Property<'a>(Object<'a>);

impl<'a> Property<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, path: sdf::Path) -> Self {
		Property(Object::new(stage, path))
	}

	/// Return the prim this property belongs to.
	pub fn prim(&self) -> usd::Prim<'a> {
		usd::Prim::new(self.stage(), self.path().prim_path())
	}
}

impl<'a> std::ops::Deref for Property<'a> {
	type Target = Object<'a>;
	fn deref(&self) -> &Self::Target {
		unsafe { std::mem::transmute(self) }
	}
}
