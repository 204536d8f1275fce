use crate::{
	sdf::{self, FIELD_KEYS},
	tf, usda, vt, Error, Result,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

static LAYER_REGISTRY_LOCK: OnceLock<Mutex<HashMap<PathBuf, Arc<Layer>>>> = OnceLock::new();

fn layer_registry() -> &'static Mutex<HashMap<PathBuf, Arc<Layer>>> {
	LAYER_REGISTRY_LOCK.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Make `path` absolute and lexically normalized, so every spelling of an
/// identifier (`dir/HelloWorld.usda`, `dir/./HelloWorld.usda`) maps to the
/// same registry key.
fn absolute(path: &Path) -> PathBuf {
	let joined = if path.is_absolute() {
		path.to_path_buf()
	} else {
		std::env::current_dir().unwrap_or_default().join(path)
	};

	let mut normalized = PathBuf::new();
	for component in joined.components() {
		match component {
			std::path::Component::CurDir => {}
			std::path::Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other),
		}
	}
	normalized
}

/// A scene description container that can combine with other such containers
/// to form simple component assets, and successively larger aggregates.
/// The contents of a Layer adhere to the [`sdf::AbstractData`] data model.
///
/// Layers opened or created through a file path are held in a global
/// registry, so opening a just-created identifier yields the same object.
pub struct Layer {
	file_path: Option<PathBuf>,
	data: RwLock<Box<dyn sdf::AbstractData>>,
}

impl std::fmt::Debug for Layer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Layer")
			.field("file_path", &self.file_path)
			.finish()
	}
}

impl Layer {
	/// Create a fresh layer at `path`, replacing any registered layer with
	/// the same identifier. The file is only written on [`Self::save`].
	pub fn create_new(path: impl AsRef<Path>) -> Result<Arc<Self>> {
		let path_buf = absolute(path.as_ref());
		check_format(&path_buf)?;

		let layer = Arc::new(Self {
			file_path: Some(path_buf.clone()),
			data: RwLock::new(Box::new(sdf::SpecData::new())),
		});

		layer_registry().lock().insert(path_buf, layer.clone());
		Ok(layer)
	}

	/// Return the layer registered at `path`, or read and parse the file.
	pub fn find_or_open(path: impl AsRef<Path>) -> Result<Arc<Self>> {
		let path_buf = absolute(path.as_ref());
		check_format(&path_buf)?;

		if let Some(layer) = layer_registry().lock().get(&path_buf) {
			log::debug!("layer registry hit for {:?}", path_buf);
			return Ok(layer.clone());
		}

		if !path_buf.is_file() {
			return Err(Error::FileNotFound(path_buf));
		}
		let content = std::fs::read_to_string(&path_buf)?;
		let data = usda::parse(&content)?;

		let layer = Arc::new(Self {
			file_path: Some(path_buf.clone()),
			data: RwLock::new(Box::new(data)),
		});

		let mut registry = layer_registry().lock();
		if let Some(layer) = registry.get(&path_buf) {
			return Ok(layer.clone());
		}
		registry.insert(path_buf, layer.clone());
		Ok(layer)
	}

	/// Create an unregistered layer with no backing file.
	pub fn anonymous() -> Arc<Self> {
		Arc::new(Self {
			file_path: None,
			data: RwLock::new(Box::new(sdf::SpecData::new())),
		})
	}

	/// Create an anonymous layer from usda text.
	pub fn import(content: &str) -> Result<Arc<Self>> {
		let data = usda::parse(content)?;
		Ok(Arc::new(Self {
			file_path: None,
			data: RwLock::new(Box::new(data)),
		}))
	}

	/// Serialize this layer to usda text.
	pub fn export_to_string(&self) -> String {
		usda::write(&**self.data.read())
	}

	/// Write this layer to its backing file.
	pub fn save(&self) -> Result<()> {
		let path = self.file_path.as_ref().ok_or(Error::AnonymousLayer)?;
		log::debug!("saving layer {:?}", path);
		std::fs::write(path, self.export_to_string())?;
		Ok(())
	}

	/// Write this layer to `path` without rebinding its identifier.
	pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
		std::fs::write(path.as_ref(), self.export_to_string())?;
		Ok(())
	}

	pub fn identifier(&self) -> String {
		self.file_path
			.as_ref()
			.and_then(|p| p.to_str())
			.unwrap_or("anon")
			.to_string()
	}

	pub fn is_anonymous(&self) -> bool {
		self.file_path.is_none()
	}

	/// Resolve an asset path relative to this layer's directory.
	pub(crate) fn resolve_path(&self, asset_path: &str) -> PathBuf {
		let asset = Path::new(asset_path);
		if asset.is_absolute() {
			return asset.to_path_buf();
		}
		let base = self
			.file_path
			.as_deref()
			.and_then(Path::parent)
			.unwrap_or(Path::new("."));
		base.join(asset)
	}
}

/// Metadata
impl Layer {
	/// Return this layer's 'defaultPrim' metadata.
	pub fn default_prim(&self) -> tf::Token {
		self.get(&sdf::Path::absolute_root_path(), &FIELD_KEYS.default_prim)
			.and_then(|v| v.get::<tf::Token>())
			.unwrap_or_default()
	}

	/// Return this layer's 'defaultPrim' metadata interpreted as an absolute prim path.
	pub fn default_prim_as_path(&self) -> sdf::Path {
		let token = self.default_prim();
		if token.is_empty() {
			return sdf::Path::empty_path();
		}
		if token.as_str().starts_with('/') {
			sdf::Path::from(token.as_str())
		} else {
			sdf::Path::absolute_root_path().append_child(&token)
		}
	}

	pub fn set_default_prim(&self, name: &tf::Token) {
		self.set(
			&sdf::Path::absolute_root_path(),
			&FIELD_KEYS.default_prim,
			vt::Value::new(name.clone()),
		);
	}
}

/// Data access. All methods lock internally; the layer is shared.
impl Layer {
	pub fn get(&self, path: &sdf::Path, field: &tf::Token) -> Option<vt::Value> {
		self.data.read().get(path, field)
	}

	pub fn set(&self, path: &sdf::Path, field: &tf::Token, value: vt::Value) {
		self.data.write().set(path, field, value);
	}

	pub fn erase(&self, path: &sdf::Path, field: &tf::Token) {
		self.data.write().erase(path, field);
	}

	pub fn create_spec(&self, path: &sdf::Path, spec_type: sdf::SpecType) {
		self.data.write().create_spec(path, spec_type);
	}

	pub fn delete_spec(&self, path: &sdf::Path) {
		self.data.write().delete_spec(path);
	}

	pub fn spec_type(&self, path: &sdf::Path) -> Option<sdf::SpecType> {
		self.data.read().spec_type(path)
	}

	pub fn has_spec(&self, path: &sdf::Path) -> bool {
		self.spec_type(path).is_some()
	}

	pub fn list(&self, path: &sdf::Path) -> Vec<tf::Token> {
		self.data.read().list(path)
	}

	/// Append `item` to a token-array field if not already present.
	/// Used for the namespace bookkeeping fields.
	pub(crate) fn append_to_token_array(
		&self,
		path: &sdf::Path,
		field: &tf::Token,
		item: &tf::Token,
	) {
		let mut data = self.data.write();
		let mut items = data
			.get(path, field)
			.and_then(|v| v.get::<vt::Array<tf::Token>>())
			.unwrap_or_default();
		if !items.contains(item) {
			items.push(item.clone());
			data.set(path, field, vt::Value::new(items));
		}
	}

}

fn check_format(path: &Path) -> Result<()> {
	match path.extension().and_then(|e| e.to_str()) {
		Some("usda") | Some("usd") => Ok(()),
		other => Err(Error::UnsupportedFormat(
			other.unwrap_or("<none>").to_string(),
		)),
	}
}
