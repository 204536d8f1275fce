use super::Property;
use crate::{
	sdf::{self, FIELD_KEYS},
	usd, vt,
};

/// A [`usd::Relationship`] creates dependencies between scenegraph objects
/// by allowing a prim to target other prims, attributes, or relationships.
#[repr(transparent)]
#[derive(Clone)]
pub struct Relationship<'a>(Property<'a>);

impl<'a> Relationship<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, path: sdf::Path) -> Self {
		Relationship(Property::new(stage, path))
	}

	pub fn targets(&self) -> vt::Array<sdf::Path> {
		self.metadata::<vt::Array<sdf::Path>>(&FIELD_KEYS.target_paths)
			.unwrap_or_default()
	}

	/// Author the complete target list for this relationship.
	pub fn set_targets(&self, targets: vt::Array<sdf::Path>) -> crate::Result<()> {
		self.stage()
			.author_relationship_targets(self.path(), targets)
	}

	/// Append `target` to the authored target list.
	pub fn add_target(&self, target: &sdf::Path) -> crate::Result<()> {
		let mut targets = self.targets();
		if !targets.contains(target) {
			targets.push(target.clone());
		}
		self.set_targets(targets)
	}
}

impl<'a> std::ops::Deref for Relationship<'a> {
	type Target = Property<'a>;
	fn deref(&self) -> &Self::Target {
		unsafe { std::mem::transmute(self) }
	}
}
