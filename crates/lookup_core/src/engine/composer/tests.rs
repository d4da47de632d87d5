use std::any::Any;
use std::sync::OnceLock;

use crate::engine::{
	DecomposeOptions, DecomposedMember, Descriptor, EngineError, MemberAttributes, Object, ObjectDescriptor, Reflect, TypeInfo, decompose, decompose_many,
	decompose_members, decompose_members_typed, decompose_object, decompose_object_typed, decompose_typed, evaluated, object, root_type,
};

#[derive(Debug)]
struct Wrapper {
	inner: String,
}

fn inner_of(wrapper: &Wrapper) -> &String {
	&wrapper.inner
}

impl Reflect for Wrapper {
	fn type_info(&self) -> TypeInfo {
		wrapper_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

fn wrapper_type() -> TypeInfo {
	static INFO: OnceLock<TypeInfo> = OnceLock::new();
	INFO.get_or_init(|| {
		TypeInfo::builder::<Wrapper>("Wrapper")
			.base(String::new().type_info(), inner_of)
			.property("inner_len", |wrapper: &Wrapper| evaluated(wrapper.inner.len()))
			.build()
	})
	.clone()
}

/// Publishes the type table of [`Wrapper`] without being one.
#[derive(Debug)]
struct Impostor;

impl Reflect for Impostor {
	fn type_info(&self) -> TypeInfo {
		wrapper_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

fn member_names<C>(members: &[DecomposedMember<C>]) -> Vec<&str> {
	members.iter().map(DecomposedMember::name).collect()
}

#[test]
fn null_value_decomposes_to_null_object() {
	let decomposed = decompose(None, &DecomposeOptions::default()).expect("null decomposes");
	assert_eq!(decomposed.name(), "<null>");
	assert_eq!(decomposed.type_name(), "null");
	assert!(decomposed.raw_value().is_none());
	assert!(decomposed.members().is_empty());
}

#[test]
fn decompose_members_rejects_null() {
	let err = decompose_members(None, &DecomposeOptions::default()).expect_err("null has no members");
	assert!(matches!(
		err,
		EngineError::NullValue {
			operation: "decompose_members"
		}
	));
}

#[test]
fn string_exposes_public_instance_members() {
	let decomposed = decompose(Some(object("hello".to_owned())), &DecomposeOptions::default()).expect("string decomposes");
	assert_eq!(decomposed.name(), "hello");
	assert_eq!(decomposed.type_name(), "String");
	assert_eq!(decomposed.type_full_name(), "alloc::string::String");
	assert_eq!(
		member_names(decomposed.members()),
		["len", "is_empty", "to_uppercase", "to_lowercase", "trim", "chars", "repeat"]
	);

	let upper = decomposed.member("to_uppercase").expect("to_uppercase present");
	assert_eq!(upper.value().name(), "HELLO");
	assert_eq!(upper.attributes(), MemberAttributes::METHOD);
	assert_eq!(decomposed.member("repeat").expect("repeat present").value().name(), "hello");
	assert!(decomposed.member("chars").expect("chars present").value().is_expandable());
	assert!(decomposed.member("split").is_none());
}

#[test]
fn inspection_adds_root_private_static_and_unsupported_members() {
	let decomposed = decompose(Some(object("hello".to_owned())), &DecomposeOptions::for_inspection(())).expect("string decomposes");

	let root = decomposed.member("type_name").expect("root member present");
	assert_eq!(root.depth(), 0);
	assert_eq!(root.declaring_type_name(), "object");
	assert_eq!(root.value().name(), "String");

	assert_eq!(decomposed.member("len").expect("len present").depth(), 1);
	assert!(decomposed.member("capacity").expect("capacity present").attributes().contains(MemberAttributes::PRIVATE));
	assert!(decomposed.member("new").expect("new present").attributes().contains(MemberAttributes::STATIC));
	assert!(decomposed.member("split").expect("split present").is_unsupported());
}

#[test]
fn shallow_decomposition_leaves_members_for_later() {
	let options = DecomposeOptions::default();
	let value = object("hello".to_owned());
	let shallow = decompose_object(Some(value.clone()), &options);
	assert!(shallow.members().is_empty());
	assert!(shallow.descriptor().is_some());

	let members = decompose_members(Some(value.clone()), &options).expect("members decompose");
	let full = decompose(Some(value), &options).expect("string decomposes");
	assert_eq!(member_names(&members), member_names(full.members()));
}

#[test]
fn batch_preserves_order_and_nulls() {
	let values: Vec<Option<Object>> = vec![Some(object(1_i32)), None, Some(object(true))];
	let batch = decompose_many(values, &DecomposeOptions::default());
	let names = batch.iter().map(|item| item.name()).collect::<Vec<_>>();
	assert_eq!(names, ["1", "<null>", "true"]);
	assert!(batch.iter().all(|item| item.members().is_empty()));
}

#[test]
fn described_object_keeps_caller_description() {
	let mut decomposed = decompose_object(Some(object(3_i64)), &DecomposeOptions::default());
	assert!(decomposed.description().is_none());
	decomposed.set_description("three");
	assert_eq!(decomposed.description(), Some("three"));
}

#[test]
fn mismatched_base_projection_is_an_error() {
	let options = DecomposeOptions::for_inspection(());
	let err = decompose(Some(object(Impostor)), &options).expect_err("impostor cannot be upcast");
	assert!(matches!(err, EngineError::BrokenHierarchy { .. }));

	let wrapper = Wrapper { inner: "abc".to_owned() };
	let decomposed = decompose(Some(object(wrapper)), &options).expect("wrapper decomposes");
	let len = decomposed.member("len").expect("base member present");
	assert_eq!(len.declaring_type_name(), "String");
	assert_eq!(len.value().name(), "3");
}

#[test]
fn base_type_hint_resolves_object_descriptor() {
	let options = DecomposeOptions::default();
	let value = object("hello".to_owned());

	let plain = decompose_object(Some(value.clone()), &options);
	assert!(plain.descriptor().expect("descriptor resolved").as_collector().is_none());

	let hinted = decompose_object_typed(Some(value.clone()), Some(&root_type()), &options);
	let expected = ObjectDescriptor::new(value.as_ref());
	assert_eq!(hinted.descriptor().expect("descriptor resolved").identity(), <ObjectDescriptor as Descriptor<()>>::identity(&expected));
	assert!(hinted.descriptor().expect("descriptor resolved").as_collector().is_some());

	let own = value.type_info();
	let exact = decompose_typed(Some(value.clone()), Some(&own), &options).expect("string decomposes");
	assert!(exact.descriptor().expect("descriptor resolved").as_collector().is_none());
	assert_eq!(exact.members().len(), decompose(Some(value.clone()), &options).expect("string decomposes").members().len());

	let members = decompose_members_typed(Some(value), Some(&root_type()), &options).expect("members decompose");
	assert!(!members.is_empty());
}
