use crate::{
	sdf, tf, usd,
	vt::{self, ValueType},
};

/// Base class for Usd scenegraph objects, providing common API.
///
/// The commonality between the scenegraph objects in Usd ([`usd::Prim`],
/// [`usd::Attribute`], [`usd::Relationship`]) is that they can all have
/// metadata. Other objects in the API simply are kinds of metadata.
///
/// **Inheritance hierarchy:**
/// - [`usd::Object`]
///   - [`usd::Prim`]
///   - [`usd::Property`]
///     - [`usd::Attribute`]
///     - [`usd::Relationship`]
#[derive(Clone)]
pub struct Object<'a> {
	stage: &'a usd::Stage,
	path: sdf::Path,
}

impl<'a> Object<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, path: sdf::Path) -> Self {
		Object { stage, path }
	}

	pub fn stage(&self) -> &'a usd::Stage {
		self.stage
	}

	pub fn path(&self) -> &sdf::Path {
		&self.path
	}

	pub fn name(&self) -> tf::Token {
		self.path.name_token()
	}

	/// Return the strongest composed opinion for a metadata field.
	pub fn metadata<T: ValueType>(&self, key: &tf::Token) -> Option<T> {
		self.stage
			.resolve_value(&self.path, key)
			.and_then(|v| v.get::<T>())
	}

	/// Author a metadata field into the stage's current edit target.
	pub fn set_metadata(&self, key: &tf::Token, value: impl Into<vt::Value>) -> crate::Result<()> {
		self.stage.author_metadata(&self.path, key, value.into())
	}

	/// Return this object's documentation (metadata).
	///
	/// This returns the empty string if no documentation has been set.
	pub fn documentation(&self) -> String {
		self.metadata(&sdf::FIELD_KEYS.documentation)
			.unwrap_or_default()
	}
}
