use crate::{declare_public_tokens, tf};

declare_public_tokens!(FieldKeys, FIELD_KEYS, [
	active: "active",
	api_schemas: "apiSchemas",
	comment: "comment",
	connection_paths: "connectionPaths",
	default: "default",
	default_prim: "defaultPrim",
	documentation: "documentation",
	end_time_code: "endTimeCode",
	interpolation: "interpolation",
	kind: "kind",
	references: "references",
	specifier: "specifier",
	start_time_code: "startTimeCode",
	target_paths: "targetPaths",
	time_samples: "timeSamples",
	type_name: "typeName",
	up_axis: "upAxis",
	variability: "variability",
	variant_selection: "variantSelection",
	variant_set_names: "variantSetNames"
]);

declare_public_tokens!(ChildrenKeys, CHILDREN_KEYS, [
	prim_children: "primChildren",
	property_children: "properties",
	variant_children: "variantChildren"
]);

declare_public_tokens!(ValueTypeNames, VALUE_TYPE_NAMES, [
	asset: "asset",
	bool_: "bool",
	color3f: "color3f",
	color3f_array: "color3f[]",
	double_: "double",
	double3: "double3",
	float_: "float",
	float2: "float2",
	float3: "float3",
	float3_array: "float3[]",
	int_array: "int[]",
	point3f_array: "point3f[]",
	texcoord2f_array: "texCoord2f[]",
	token: "token",
	token_array: "token[]"
]);
