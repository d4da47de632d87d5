use tracing::debug;

use crate::engine::members::MemberEnumerator;
use crate::engine::{DecomposeOptions, DecomposedMember, DecomposedObject, EngineError, Object, Result, TypeInfo};

/// Decompose `value` into its identity labels and its full member list.
///
/// A null value yields the null object with no members.
pub fn decompose<C>(value: Option<Object>, options: &DecomposeOptions<C>) -> Result<DecomposedObject<C>> {
	decompose_typed(value, None, options)
}

/// [`decompose`] with a static type hint handed to the type resolver.
///
/// The hint stands in for the runtime type when resolving the object's own
/// descriptor, so a base-type hint yields the descriptor of that base view.
pub fn decompose_typed<C>(value: Option<Object>, static_type: Option<&TypeInfo>, options: &DecomposeOptions<C>) -> Result<DecomposedObject<C>> {
	let mut decomposed = decompose_object_typed(value, static_type, options);
	if let Some(raw) = &decomposed.raw_value {
		decomposed.members = MemberEnumerator::new(options).enumerate(raw, static_type)?;
	}

	debug!(
		type_name = decomposed.type_name(),
		name = decomposed.name(),
		hinted = static_type.is_some(),
		members = decomposed.members.len(),
		"decomposed object"
	);
	Ok(decomposed)
}

/// Decompose only the identity labels of `value`; members are left empty.
///
/// Used for batch summaries; expand later with [`decompose_members`].
pub fn decompose_object<C>(value: Option<Object>, options: &DecomposeOptions<C>) -> DecomposedObject<C> {
	decompose_object_typed(value, None, options)
}

/// [`decompose_object`] with a static type hint handed to the type resolver.
pub fn decompose_object_typed<C>(value: Option<Object>, static_type: Option<&TypeInfo>, options: &DecomposeOptions<C>) -> DecomposedObject<C> {
	let descriptor = (options.type_resolver)(value.as_ref(), static_type);
	let identity = descriptor.identity();
	DecomposedObject {
		name: identity.name.clone(),
		type_name: identity.type_name.clone(),
		type_full_name: identity.type_full_name.clone(),
		description: identity.description.clone(),
		descriptor: Some(descriptor),
		raw_value: value,
		members: Vec::new(),
	}
}

/// Decompose the member list of an already identified value.
pub fn decompose_members<C>(value: Option<Object>, options: &DecomposeOptions<C>) -> Result<Vec<DecomposedMember<C>>> {
	decompose_members_typed(value, None, options)
}

/// [`decompose_members`] with a static type hint for the runtime-type level.
pub fn decompose_members_typed<C>(value: Option<Object>, static_type: Option<&TypeInfo>, options: &DecomposeOptions<C>) -> Result<Vec<DecomposedMember<C>>> {
	let value = value.ok_or(EngineError::NullValue {
		operation: "decompose_members",
	})?;
	let members = MemberEnumerator::new(options).enumerate(&value, static_type)?;
	debug!(type_name = value.type_info().name(), members = members.len(), "decomposed members");
	Ok(members)
}

/// Shallow-decompose a batch of values, preserving order.
pub fn decompose_many<C, I>(values: I, options: &DecomposeOptions<C>) -> Vec<DecomposedObject<C>>
where
	I: IntoIterator<Item = Option<Object>>,
{
	values.into_iter().map(|value| decompose_object(value, options)).collect()
}

#[cfg(test)]
mod tests;
