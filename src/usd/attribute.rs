use super::Property;
use crate::{
	sdf::{self, FIELD_KEYS},
	tf, usd,
	vt::{self, ValueType},
};

/// Scenegraph object for authoring and retrieving numeric, string, and
/// array valued data, optionally sampled over time.
#[repr(transparent)]
#[derive(Clone)]
pub struct Attribute<'a>(Property<'a>);

impl<'a> Attribute<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, path: sdf::Path) -> Self {
		Attribute(Property::new(stage, path))
	}

	#[track_caller]
	pub fn get<T: ValueType>(&self) -> T {
		self.stage()
			.resolve_value(self.path(), &FIELD_KEYS.default)
			.unwrap()
			.get::<T>()
			.unwrap()
	}

	pub fn try_get<T: ValueType>(&self) -> Option<T> {
		self.stage()
			.resolve_value(self.path(), &FIELD_KEYS.default)
			.and_then(|v| v.get::<T>())
	}

	pub fn get_value(&self) -> Option<vt::Value> {
		self.stage()
			.resolve_value(self.path(), &FIELD_KEYS.default)
	}

	/// Return the attribute's value at `time`: the resolved time samples
	/// (mapped through the contributing site's layer offset, linearly
	/// interpolated, held outside the sampled range), or the default.
	pub fn get_at<T: ValueType>(&self, time: f64) -> Option<T> {
		self.stage()
			.resolve_value_at_time(self.path(), time)
			.and_then(|v| v.get::<T>())
	}

	pub fn type_name(&self) -> tf::Token {
		self.metadata(&FIELD_KEYS.type_name).unwrap_or_default()
	}

	pub fn has_authored_value(&self) -> bool {
		self.get_value().is_some()
	}
}

/// Authoring. All edits land in the stage's current edit target.
impl<'a> Attribute<'a> {
	/// Author the attribute's default value.
	///
	/// Creates the attribute spec if it does not exist yet, inferring a
	/// type name from the value. Authoring a value that does not match an
	/// already declared type name is an error.
	pub fn set<T: ValueType>(&self, value: T) -> crate::Result<()> {
		self.stage()
			.author_attribute_value(self.path(), &FIELD_KEYS.default, vt::Value::new(value))
	}

	/// Author a value sample at `time`.
	pub fn set_time_sample<T: ValueType>(&self, time: f64, value: T) -> crate::Result<()> {
		self.stage()
			.author_time_sample(self.path(), time, vt::Value::new(value))
	}

	/// Remove the authored value opinions in the current edit target.
	/// A spec left without any opinions is removed entirely.
	pub fn clear(&self) -> crate::Result<()> {
		self.stage().clear_attribute(self.path())
	}

	/// Connect this attribute to the attribute at `source`.
	pub fn add_connection(&self, source: &sdf::Path) -> crate::Result<()> {
		self.stage()
			.author_attribute_value(
				self.path(),
				&FIELD_KEYS.connection_paths,
				vt::Value::new(sdf::PathListOp::explicit(vec![source.clone()])),
			)
	}

	/// Return the paths this attribute is connected to.
	pub fn connections(&self) -> Vec<sdf::Path> {
		self.metadata::<sdf::PathListOp>(&FIELD_KEYS.connection_paths)
			.map(|op| op.applied_items())
			.unwrap_or_default()
	}
}

impl<'a> std::ops::Deref for Attribute<'a> {
	type Target = Property<'a>;
	fn deref(&self) -> &Self::Target {
		unsafe { std::mem::transmute(self) }
	}
}
