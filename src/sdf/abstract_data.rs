use crate::{sdf, tf, vt};
use std::collections::HashMap;

/// Interface for scene description data storage.
pub trait AbstractData: Send + Sync {
	/// Create a new spec at `path` with the given `spec_type`.
	/// If the spec already exists, the spec type will be changed.
	fn create_spec(&mut self, path: &sdf::Path, spec_type: sdf::SpecType);

	/// Remove the spec at `path` and all its fields.
	fn delete_spec(&mut self, path: &sdf::Path);

	/// Return the type of the spec at `path`.
	fn spec_type(&self, path: &sdf::Path) -> Option<sdf::SpecType>;

	/// Return the value of the given `path` and `field`.
	fn get(&self, path: &sdf::Path, field: &tf::Token) -> Option<vt::Value>;

	/// Set the value of the given `path` and `field`.
	fn set(&mut self, path: &sdf::Path, field: &tf::Token, value: vt::Value);

	/// Remove the value of the given `path` and `field`.
	fn erase(&mut self, path: &sdf::Path, field: &tf::Token);

	/// Return the names of all the fields that are set at `path`.
	fn list(&self, path: &sdf::Path) -> Vec<tf::Token>;

	/// Return every spec path in this data object in arbitrary order.
	fn visit_specs(&self) -> Vec<sdf::Path>;
}

/// A single addressable object and its fields.
#[derive(Debug, Default, Clone)]
struct Spec {
	spec_type: Option<sdf::SpecType>,
	fields: HashMap<tf::Token, vt::Value>,
}

/// Hash-map backed [`AbstractData`] implementation used for all layers.
///
/// Namespace order is data, not map order: prim children live in the
/// parent's `primChildren` field, properties in `properties`, variants in
/// the variant set's `variantChildren`. Writers rely on those fields for
/// deterministic output.
#[derive(Debug, Default)]
pub struct SpecData {
	specs: HashMap<sdf::Path, Spec>,
}

impl SpecData {
	pub fn new() -> Self {
		let mut data = Self {
			specs: HashMap::new(),
		};
		data.create_spec(&sdf::Path::absolute_root_path(), sdf::SpecType::PseudoRoot);
		data
	}
}

impl AbstractData for SpecData {
	fn create_spec(&mut self, path: &sdf::Path, spec_type: sdf::SpecType) {
		let spec = self.specs.entry(path.clone()).or_default();
		spec.spec_type = Some(spec_type);
	}

	fn delete_spec(&mut self, path: &sdf::Path) {
		self.specs.remove(path);
	}

	fn spec_type(&self, path: &sdf::Path) -> Option<sdf::SpecType> {
		self.specs.get(path).and_then(|spec| spec.spec_type)
	}

	fn get(&self, path: &sdf::Path, field: &tf::Token) -> Option<vt::Value> {
		self.specs
			.get(path)
			.and_then(|spec| spec.fields.get(field))
			.cloned()
	}

	fn set(&mut self, path: &sdf::Path, field: &tf::Token, value: vt::Value) {
		let spec = self.specs.entry(path.clone()).or_default();
		spec.fields.insert(field.clone(), value);
	}

	fn erase(&mut self, path: &sdf::Path, field: &tf::Token) {
		if let Some(spec) = self.specs.get_mut(path) {
			spec.fields.remove(field);
		}
	}

	fn list(&self, path: &sdf::Path) -> Vec<tf::Token> {
		self.specs
			.get(path)
			.map(|spec| spec.fields.keys().cloned().collect())
			.unwrap_or_default()
	}

	fn visit_specs(&self) -> Vec<sdf::Path> {
		self.specs.keys().cloned().collect()
	}
}
