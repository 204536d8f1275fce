use super::TOKENS;
use crate::{
	gf, sdf, tf, usd,
	vt::{self, ValueType},
};
use glam::{DMat4, DVec3};

/// The transformation type of a single xform op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XformOpType {
	Translate,
	Scale,
	RotateX,
	RotateY,
	RotateZ,
}

impl XformOpType {
	fn op_name(&self) -> &'static str {
		match self {
			XformOpType::Translate => "translate",
			XformOpType::Scale => "scale",
			XformOpType::RotateX => "rotateX",
			XformOpType::RotateY => "rotateY",
			XformOpType::RotateZ => "rotateZ",
		}
	}

}

impl TryFrom<&str> for XformOpType {
	type Error = ();
	fn try_from(s: &str) -> Result<Self, Self::Error> {
		Ok(match s {
			"translate" => XformOpType::Translate,
			"scale" => XformOpType::Scale,
			"rotateX" => XformOpType::RotateX,
			"rotateY" => XformOpType::RotateY,
			"rotateZ" => XformOpType::RotateZ,
			_ => return Err(()),
		})
	}
}

/// Numeric precision of an xform op's value attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XformOpPrecision {
	Float,
	Double,
}

/// Schema wrapper for a [`usd::Attribute`] holding one ordered
/// transformation step on an xformable prim.
pub struct XformOp<'a> {
	attr: usd::Attribute<'a>,
	op_type: XformOpType,
}

impl<'a> XformOp<'a> {
	pub fn attr(&self) -> &usd::Attribute<'a> {
		&self.attr
	}

	pub fn op_type(&self) -> XformOpType {
		self.op_type
	}

	/// The op's entry in the xformOpOrder token list.
	pub fn op_order_token(&self) -> tf::Token {
		self.attr.name()
	}

	/// Author a static value for this op.
	pub fn set<T: ValueType>(&self, value: T) -> crate::Result<()> {
		self.attr.set(value)
	}

	/// Author a value sample at `time`.
	pub fn set_time_sample<T: ValueType>(&self, time: f64, value: T) -> crate::Result<()> {
		self.attr.set_time_sample(time, value)
	}
}

/// Authoring and computation of transformation operations, as consumed by
/// xformable prims. The order in which ops are added is the order in which
/// they appear in xformOpOrder, and therefore the composition order.
pub struct Xformable<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Xformable<'a> {
	pub fn new(prim: &usd::Prim<'a>) -> Self {
		Self { prim: prim.clone() }
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}

	pub fn add_translate_op(
		&self,
		precision: XformOpPrecision,
		suffix: &tf::Token,
	) -> crate::Result<XformOp<'a>> {
		self.add_op(XformOpType::Translate, precision, suffix)
	}

	pub fn add_scale_op(
		&self,
		precision: XformOpPrecision,
		suffix: &tf::Token,
	) -> crate::Result<XformOp<'a>> {
		self.add_op(XformOpType::Scale, precision, suffix)
	}

	pub fn add_rotate_x_op(
		&self,
		precision: XformOpPrecision,
		suffix: &tf::Token,
	) -> crate::Result<XformOp<'a>> {
		self.add_op(XformOpType::RotateX, precision, suffix)
	}

	pub fn add_rotate_y_op(
		&self,
		precision: XformOpPrecision,
		suffix: &tf::Token,
	) -> crate::Result<XformOp<'a>> {
		self.add_op(XformOpType::RotateY, precision, suffix)
	}

	pub fn add_rotate_z_op(
		&self,
		precision: XformOpPrecision,
		suffix: &tf::Token,
	) -> crate::Result<XformOp<'a>> {
		self.add_op(XformOpType::RotateZ, precision, suffix)
	}

	/// Create the op's value attribute and append it to xformOpOrder.
	fn add_op(
		&self,
		op_type: XformOpType,
		precision: XformOpPrecision,
		suffix: &tf::Token,
	) -> crate::Result<XformOp<'a>> {
		let name = if suffix.is_empty() {
			tf::Token::new(format!("xformOp:{}", op_type.op_name()))
		} else {
			tf::Token::new(format!("xformOp:{}:{}", op_type.op_name(), suffix))
		};

		let type_name = tf::Token::new(op_value_type_name(op_type, precision));
		let attr = self
			.prim
			.create_attribute(&name, &type_name, sdf::Variability::Varying)?;

		let mut order = self.xform_op_order();
		if !order.contains(&name) {
			order.push(name);
			self.set_xform_op_order_tokens(order)?;
		}

		Ok(XformOp { attr, op_type })
	}

	/// Author the complete op order; an empty list suppresses all
	/// (including inherited) transform opinions.
	pub fn set_xform_op_order(&self, ops: &[XformOp]) -> crate::Result<()> {
		self.set_xform_op_order_tokens(ops.iter().map(|op| op.op_order_token()).collect())
	}

	fn set_xform_op_order_tokens(&self, order: vt::Array<tf::Token>) -> crate::Result<()> {
		let attr = self.prim.create_attribute(
			&TOKENS.xform_op_order,
			&sdf::VALUE_TYPE_NAMES.token_array,
			sdf::Variability::Uniform,
		)?;
		attr.set(order)
	}

	/// The composed op order token list; empty if unauthored.
	pub fn xform_op_order(&self) -> vt::Array<tf::Token> {
		self.prim
			.attribute(&TOKENS.xform_op_order)
			.try_get::<vt::Array<tf::Token>>()
			.unwrap_or_default()
	}

	/// Compute the composed local transformation at `time`.
	///
	/// Ops multiply in list order with points on the right, so the first
	/// entry of xformOpOrder is the outermost transform and the last is
	/// applied to geometry first.
	pub fn local_transform_at(&self, time: f64) -> DMat4 {
		let mut matrix = DMat4::IDENTITY;

		for op_token in self.xform_op_order().iter() {
			let mut parts = op_token.as_str().splitn(3, ':');
			let _prefix = parts.next();
			let op_type = parts
				.next()
				.and_then(|name| XformOpType::try_from(name).ok());
			let Some(op_type) = op_type else {
				continue;
			};

			let attr = self.prim.attribute(op_token);
			let Some(value) = self
				.prim
				.stage()
				.resolve_value_at_time(attr.path(), time)
			else {
				continue;
			};
			if let Some(op_matrix) = op_transform(op_type, &value) {
				matrix *= op_matrix;
			}
		}

		matrix
	}
}

fn op_value_type_name(op_type: XformOpType, precision: XformOpPrecision) -> &'static str {
	match (op_type, precision) {
		(XformOpType::Translate | XformOpType::Scale, XformOpPrecision::Float) => "float3",
		(XformOpType::Translate | XformOpType::Scale, XformOpPrecision::Double) => "double3",
		(_, XformOpPrecision::Float) => "float",
		(_, XformOpPrecision::Double) => "double",
	}
}

fn op_transform(op_type: XformOpType, value: &vt::Value) -> Option<DMat4> {
	let scalar = || -> Option<f64> {
		value
			.get::<f64>()
			.or_else(|| value.get::<f32>().map(|v| v.into()))
	};
	let vec3 = || -> Option<DVec3> {
		value
			.get::<gf::Vec3d>()
			.or_else(|| value.get::<gf::Vec3f>().map(|v| gf::Vec3d::from(v)))
			.map(|v| DVec3::new(v.x, v.y, v.z))
	};

	// Rotation values are authored in degrees.
	Some(match op_type {
		XformOpType::Translate => DMat4::from_translation(vec3()?),
		XformOpType::Scale => DMat4::from_scale(vec3()?),
		XformOpType::RotateX => DMat4::from_rotation_x(scalar()?.to_radians()),
		XformOpType::RotateY => DMat4::from_rotation_y(scalar()?.to_radians()),
		XformOpType::RotateZ => DMat4::from_rotation_z(scalar()?.to_radians()),
	})
}

/// Authoring interface for the common translate/rotate/scale transform
/// stack with standard op names.
pub struct XformCommonApi<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> XformCommonApi<'a> {
	pub fn new(prim: &usd::Prim<'a>) -> Self {
		Self { prim: prim.clone() }
	}

	/// Author a double-precision translation with the standard op name,
	/// inserting it into the op order if needed.
	pub fn set_translate(&self, translation: gf::Vec3d) -> crate::Result<()> {
		let xformable = Xformable::new(&self.prim);
		let name = tf::Token::new("xformOp:translate");

		let attr = self.prim.create_attribute(
			&name,
			&sdf::VALUE_TYPE_NAMES.double3,
			sdf::Variability::Varying,
		)?;
		attr.set(translation)?;

		let mut order = xformable.xform_op_order();
		if !order.contains(&name) {
			order.insert(0, name);
			xformable.set_xform_op_order_tokens(order)?;
		}
		Ok(())
	}
}
