use crate::{gf, sdf, tf, vt};
use std::collections::HashMap;

pub type Array<T> = Vec<T>;
pub type Dictionary = HashMap<String, vt::Value>;

/// Container for a value of arbitrary scene description type.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
	store: ValueStore,
}

impl Value {
	pub fn new<T: ValueType>(value: T) -> Self {
		Value {
			store: value.store(),
		}
	}

	pub fn empty() -> Self {
		Value {
			store: ValueStore::Empty,
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self.store, ValueStore::Empty)
	}

	pub fn get<T: ValueType>(&self) -> Option<T> {
		T::load(&self.store)
	}

	#[track_caller]
	pub fn get_unchecked<T: ValueType>(&self) -> T {
		T::load(&self.store).unwrap()
	}

	pub(crate) fn store(&self) -> &ValueStore {
		&self.store
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueStore {
	Empty,

	Bool(bool),

	Int(i32),
	IntArray(Array<i32>),

	Float(f32),
	FloatArray(Array<f32>),
	Double(f64),
	DoubleArray(Array<f64>),

	Vec2f(gf::Vec2f),
	Vec2fArray(Array<gf::Vec2f>),

	Vec3f(gf::Vec3f),
	Vec3fArray(Array<gf::Vec3f>),
	Vec3d(gf::Vec3d),

	Token(tf::Token),
	TokenArray(Array<tf::Token>),

	String(String),
	StringArray(Array<String>),

	TokenListOp(sdf::TokenListOp),
	PathListOp(sdf::PathListOp),
	ReferenceListOp(sdf::ReferenceListOp),

	Path(sdf::Path),
	PathArray(Array<sdf::Path>),

	AssetPath(sdf::AssetPath),

	Specifier(sdf::Specifier),
	Variability(sdf::Variability),

	TimeSamples(sdf::TimeSampleMap),

	Dictionary(Dictionary),
}

pub trait ValueType {
	fn load(store: &ValueStore) -> Option<Self>
	where
		Self: Sized;
	fn store(self) -> ValueStore;
}

macro_rules! impl_value_type_clone {
	($type:ty, $store:ident) => {
		impl ValueType for $type {
			fn load(store: &ValueStore) -> Option<Self> {
				match store {
					ValueStore::$store(v) => Some(v.clone()),
					_ => None,
				}
			}

			fn store(self) -> ValueStore {
				ValueStore::$store(self)
			}
		}

		impl From<$type> for Value {
			fn from(value: $type) -> Self {
				Value {
					store: ValueStore::$store(value),
				}
			}
		}
	};
}

macro_rules! impl_value_type_deref {
	($type:ty, $store:ident) => {
		impl ValueType for $type {
			fn load(store: &ValueStore) -> Option<Self> {
				match store {
					ValueStore::$store(v) => Some(*v),
					_ => None,
				}
			}

			fn store(self) -> ValueStore {
				ValueStore::$store(self)
			}
		}

		impl From<$type> for Value {
			fn from(value: $type) -> Self {
				Value {
					store: ValueStore::$store(value),
				}
			}
		}
	};
}

impl_value_type_deref!(bool, Bool);

impl_value_type_deref!(i32, Int);
impl_value_type_clone!(Array<i32>, IntArray);

impl_value_type_deref!(f32, Float);
impl_value_type_clone!(Array<f32>, FloatArray);
impl_value_type_deref!(f64, Double);
impl_value_type_clone!(Array<f64>, DoubleArray);

impl_value_type_deref!(gf::Vec2f, Vec2f);
impl_value_type_clone!(Array<gf::Vec2f>, Vec2fArray);

impl_value_type_deref!(gf::Vec3f, Vec3f);
impl_value_type_clone!(Array<gf::Vec3f>, Vec3fArray);
impl_value_type_deref!(gf::Vec3d, Vec3d);

impl_value_type_clone!(tf::Token, Token);
impl_value_type_clone!(Array<tf::Token>, TokenArray);

impl_value_type_clone!(String, String);
impl_value_type_clone!(Array<String>, StringArray);

impl_value_type_clone!(sdf::TokenListOp, TokenListOp);
impl_value_type_clone!(sdf::PathListOp, PathListOp);
impl_value_type_clone!(sdf::ReferenceListOp, ReferenceListOp);

impl_value_type_clone!(sdf::Path, Path);
impl_value_type_clone!(Array<sdf::Path>, PathArray);

impl_value_type_clone!(sdf::AssetPath, AssetPath);

impl_value_type_deref!(sdf::Specifier, Specifier);
impl_value_type_deref!(sdf::Variability, Variability);

impl_value_type_clone!(sdf::TimeSampleMap, TimeSamples);

impl_value_type_clone!(Dictionary, Dictionary);

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value {
			store: ValueStore::String(value.to_string()),
		}
	}
}
