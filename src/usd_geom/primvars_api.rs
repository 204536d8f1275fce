use super::primvar::{Primvar, TOKENS};
use crate::{sdf, tf, usd};

/// [`PrimvarsApi`] encodes geometric "primitive variables" as [`Primvar`],
/// which interpolate across a primitive's topology,
/// can override shader inputs, and inherit down namespace.
pub struct PrimvarsApi<'a> {
	pub prim: &'a usd::Prim<'a>,
}

impl<'a> PrimvarsApi<'a> {
	/// Construct a [`PrimvarsApi`] for the given [`usd::Prim`].
	pub fn new(prim: &'a usd::Prim<'a>) -> Self {
		Self { prim }
	}

	/// Author a primvar with the given value type and interpolation.
	///
	/// Name lookup will account for Primvar namespacing.
	pub fn create_primvar(
		&self,
		name: &tf::Token,
		type_name: &tf::Token,
		interpolation: &tf::Token,
	) -> crate::Result<Primvar<'a>> {
		let attr_name = make_namespaced(name);
		let attr = self
			.prim
			.create_attribute(&attr_name, type_name, sdf::Variability::Varying)?;
		let primvar = Primvar::new(attr);
		primvar.set_interpolation(interpolation)?;
		Ok(primvar)
	}

	/// Return the [`Primvar`] object named by `name`.
	pub fn primvar(&self, name: &tf::Token) -> Primvar<'a> {
		let attr_name = make_namespaced(name);
		Primvar::new(self.prim.attribute(&attr_name))
	}

	/// Is there an authored [`Primvar`] `name` on this prim?
	pub fn has_primvar(&self, name: &tf::Token) -> bool {
		let attr_name = make_namespaced(name);
		self.prim.has_attribute(&attr_name)
	}
}

fn make_namespaced(name: &tf::Token) -> tf::Token {
	if name.as_str().starts_with(TOKENS.primvars_prefix.as_str()) {
		name.clone()
	} else {
		tf::Token::new(format!("{}{}", TOKENS.primvars_prefix, name))
	}
}
