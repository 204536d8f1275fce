//! Scene Description Foundations

mod abstract_data;
mod layer;
mod list_op;
mod path;
mod retiming;
mod schema;

pub use abstract_data::*;
pub use layer::*;
pub use list_op::*;
pub use path::*;
pub use retiming::*;
pub use schema::{CHILDREN_KEYS, FIELD_KEYS, VALUE_TYPE_NAMES};

use crate::vt;

/// An enum that specifies the type of an object.
/// Objects have fields and are addressable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecType {
	Unknown,
	Attribute,
	Prim,
	PseudoRoot,
	Relationship,
	Variant,
	VariantSet,
}

/// An enum that identifies the possible specifiers for a PrimSpec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier {
	Def,
	Over,
	Class,
}

impl Specifier {
	pub fn as_str(&self) -> &'static str {
		match self {
			Specifier::Def => "def",
			Specifier::Over => "over",
			Specifier::Class => "class",
		}
	}
}

/// An enum that identifies variability types for attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variability {
	Varying,
	Uniform,
}

/// A map of time codes to sampled values, kept ordered by time.
pub type TimeSampleMap = Vec<(f64, vt::Value)>;

/// Represents a reference and all its meta data.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reference {
	/// The asset path to the external layer.
	pub asset_path: String,
	/// The path to the referenced prim in the external layer.
	/// Empty means the target layer's default prim.
	pub prim_path: Path,
	/// The layer offset to transform time.
	pub layer_offset: Retiming,
}

impl Reference {
	pub fn new(asset_path: impl Into<String>) -> Self {
		Self {
			asset_path: asset_path.into(),
			prim_path: Path::empty_path(),
			layer_offset: Retiming::default(),
		}
	}

	pub fn with_prim_path(mut self, prim_path: impl Into<Path>) -> Self {
		self.prim_path = prim_path.into();
		self
	}

	pub fn with_layer_offset(mut self, layer_offset: Retiming) -> Self {
		self.layer_offset = layer_offset;
		self
	}
}

impl From<&str> for Reference {
	fn from(asset_path: &str) -> Self {
		Reference::new(asset_path)
	}
}

/// Contains an asset path and optional resolved path.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AssetPath {
	pub authored_path: String,
	pub resolved_path: String,
}

impl AssetPath {
	pub fn new(authored_path: impl Into<String>) -> Self {
		Self {
			authored_path: authored_path.into(),
			resolved_path: String::new(),
		}
	}

	/// Return the exact input that is passed to asset resolution.
	pub fn asset_path(&self) -> &String {
		&self.authored_path
	}
}
