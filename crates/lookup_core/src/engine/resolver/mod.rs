use std::sync::Arc;

use crate::engine::{
	BooleanDescriptor, Descriptor, EnumerableDescriptor, FaultDescriptor, NullDescriptor, Object, ObjectDescriptor, StringDescriptor, TypeInfo,
};

/// Maps a value and an optional static type to a fresh descriptor.
///
/// Must be a pure function of its inputs; one resolver is shared by every
/// call that uses the same options.
pub type TypeResolver<C = ()> = Arc<dyn Fn(Option<&Object>, Option<&TypeInfo>) -> Box<dyn Descriptor<C>> + Send + Sync>;

/// Built-in value to descriptor mapping.
///
/// When `static_type` is given, the dedicated arms only match if it names
/// the value's exact type, so a base level of a hierarchy falls through to
/// [`ObjectDescriptor`]. Custom resolvers handle their own cases and
/// delegate the rest here.
pub fn default_type_resolver<C>(value: Option<&Object>, static_type: Option<&TypeInfo>) -> Box<dyn Descriptor<C>> {
	let Some(value) = value else {
		return Box::new(NullDescriptor::new());
	};

	let any = value.as_any();
	if !static_type.is_none_or(|info| info.type_id() == any.type_id()) {
		return Box::new(ObjectDescriptor::new(value.as_ref()));
	}

	if let Some(flag) = any.downcast_ref::<bool>() {
		return Box::new(BooleanDescriptor::new(*flag));
	}
	if let Some(text) = any.downcast_ref::<String>() {
		return Box::new(StringDescriptor::new(text));
	}
	if value.as_iterable().is_some() {
		return Box::new(EnumerableDescriptor::new(value.clone()));
	}
	if let Some(fault) = value.as_fault() {
		return Box::new(FaultDescriptor::new(fault));
	}

	Box::new(ObjectDescriptor::new(value.as_ref()))
}

/// Wrap [`default_type_resolver`] for use in options.
pub fn default_resolver<C: 'static>() -> TypeResolver<C> {
	Arc::new(default_type_resolver::<C>)
}
