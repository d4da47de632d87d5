use std::any::Any;
use std::sync::OnceLock;

use crate::engine::{
	BooleanDescriptor, ContextExtensionManager, Descriptor, DescriptorIdentity, EnumerableDescriptor, ExtensionManager, Fault, FaultDescriptor, Iterable,
	NullDescriptor, Object, ObjectDescriptor, Reflect, StringDescriptor, TypeInfo, Variants, object,
};

/// Sequence without a known length, walked lazily.
#[derive(Debug)]
struct Countdown {
	from: usize,
}

impl Reflect for Countdown {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| TypeInfo::builder::<Countdown>("Countdown").build()).clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_iterable(&self) -> Option<&dyn Iterable> {
		Some(self)
	}
}

impl Iterable for Countdown {
	fn len_hint(&self) -> Option<usize> {
		None
	}

	fn items(&self) -> Box<dyn Iterator<Item = Option<Object>> + '_> {
		Box::new((0..self.from).rev().map(|value| Some(object(value))))
	}
}

#[test]
fn stock_identities_follow_value_kind() {
	let descriptor: &dyn Descriptor = &BooleanDescriptor::new(true);
	assert_eq!(descriptor.identity().name, "true");
	assert_eq!(descriptor.identity().type_name.as_ref(), "bool");
	assert!(descriptor.as_collector().is_none());

	let descriptor: &dyn Descriptor = &StringDescriptor::new("hello");
	assert_eq!(descriptor.identity().name, "hello");
	assert_eq!(descriptor.identity().type_full_name.as_ref(), "alloc::string::String");

	let descriptor: &dyn Descriptor = &NullDescriptor::new();
	assert_eq!(descriptor.identity(), &DescriptorIdentity::null());
}

#[test]
fn object_and_fault_descriptors_are_collectors() {
	let descriptor: &dyn Descriptor = &ObjectDescriptor::new(&5_i32);
	assert!(descriptor.as_collector().is_some());
	assert!(descriptor.as_enumerator().is_none());

	let fault = Fault::evaluation("boom");
	let descriptor: &dyn Descriptor = &FaultDescriptor::new(&fault);
	assert!(descriptor.as_collector().is_some());
	assert_eq!(descriptor.identity().description.as_deref(), Some("boom"));
}

#[test]
fn enumerator_checks_emptiness_without_known_length() {
	let empty = EnumerableDescriptor::new(object(Countdown { from: 0 }));
	let enumerator = Descriptor::<()>::as_enumerator(&empty).expect("enumerable descriptor enumerates");
	assert!(enumerator.is_empty());

	let full = EnumerableDescriptor::new(object(Countdown { from: 3 }));
	let enumerator = Descriptor::<()>::as_enumerator(&full).expect("enumerable descriptor enumerates");
	assert!(!enumerator.is_empty());
	assert_eq!(enumerator.items().count(), 3);
}

#[test]
fn enumerator_uses_length_hint_for_lists() {
	let list: Vec<Option<Object>> = vec![None, None];
	let descriptor = EnumerableDescriptor::new(object(list));
	let enumerator = Descriptor::<()>::as_enumerator(&descriptor).expect("enumerable descriptor enumerates");
	assert!(!enumerator.is_empty());
	assert_eq!(enumerator.items().count(), 2);
}

#[test]
fn extension_managers_keep_registration_order() {
	let mut manager = ExtensionManager::new();
	manager.register("first", || Variants::value(1_i32)).register("second", Variants::empty);
	assert_eq!(manager.len(), 2);
	let names = manager.into_entries().into_iter().map(|(name, _)| name.into_string()).collect::<Vec<_>>();
	assert_eq!(names, ["first", "second"]);

	let mut manager = ContextExtensionManager::<i32>::new();
	assert!(manager.is_empty());
	manager.register("doubled", |context: &i32| Variants::value(context * 2));
	let (_, factory) = manager.into_entries().pop().expect("one registration");
	let Variants::Single(variant) = factory(&21) else {
		panic!("expected single variant");
	};
	let value = variant.value.expect("value present");
	assert_eq!(value.as_any().downcast_ref::<i32>(), Some(&42));
}

#[test]
fn identity_builders_override_labels() {
	let identity = DescriptorIdentity::of(&7_i64).named("seven").describe("lucky");
	assert_eq!(identity.name, "seven");
	assert_eq!(identity.type_name.as_ref(), "i64");
	assert_eq!(identity.description.as_deref(), Some("lucky"));
}
