use std::any::Any;
use std::sync::OnceLock;

use crate::engine::{FaultKind, MemberKind, Object, ParameterInfo, Reflect, TypeInfo, Visibility, argument, evaluated, object, root_type};

#[derive(Debug)]
struct Base {
	tag: &'static str,
}

#[derive(Debug)]
struct Derived {
	base: Base,
	count: usize,
}

fn base_type() -> TypeInfo {
	static INFO: OnceLock<TypeInfo> = OnceLock::new();
	INFO.get_or_init(|| {
		TypeInfo::builder::<Base>("Base")
			.property("tag", |base: &Base| evaluated(base.tag.to_owned()))
			.build()
	})
	.clone()
}

fn base_of(derived: &Derived) -> &Base {
	&derived.base
}

impl Reflect for Base {
	fn type_info(&self) -> TypeInfo {
		base_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl Reflect for Derived {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<Derived>("Derived")
				.base(base_type(), base_of)
				.property("count", |derived: &Derived| evaluated(derived.count))
				.field("hidden", |derived: &Derived| evaluated(derived.count * 2))
				.private()
				.method("create", |_: &Derived| evaluated(0_usize))
				.static_member()
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[test]
fn builder_records_kinds_and_modifiers_in_order() {
	let info = Derived {
		base: Base { tag: "a" },
		count: 3,
	}
	.type_info();

	let names = info.members().iter().map(|member| member.name.as_ref()).collect::<Vec<_>>();
	assert_eq!(names, ["count", "hidden", "create"]);

	let hidden = info.member("hidden").expect("hidden member exists");
	assert_eq!(hidden.kind, MemberKind::Field);
	assert_eq!(hidden.visibility, Visibility::Private);
	assert!(!hidden.is_static);

	let create = info.member("create").expect("create member exists");
	assert_eq!(create.visibility, Visibility::Public);
	assert!(create.is_static);
}

#[test]
fn hierarchy_chain_ends_at_root_type() {
	let derived = Derived {
		base: Base { tag: "a" },
		count: 3,
	};
	let info = derived.type_info();
	let base_link = info.base().expect("derived has a base");
	assert_eq!(base_link.info(), &base_type());

	let root_link = base_link.info().base().expect("base has the root as base");
	assert_eq!(root_link.info(), &root_type());
	assert!(root_type().base().is_none());
}

#[test]
fn base_link_projects_embedded_value() {
	let derived = Derived {
		base: Base { tag: "embedded" },
		count: 3,
	};
	let info = derived.type_info();
	let link = info.base().expect("derived has a base");
	let base = link.upcast(&derived).expect("derived views as base");

	let tag = base_type().member("tag").expect("tag exists").invoke(base, &[]).expect("tag evaluates");
	let tag = tag.expect("tag is not null");
	assert_eq!(tag.as_any().downcast_ref::<String>().map(String::as_str), Some("embedded"));
}

#[test]
fn base_link_rejects_unrelated_instance() {
	let derived = Derived {
		base: Base { tag: "a" },
		count: 3,
	};
	let link = derived.type_info().base().cloned().expect("derived has a base");
	assert!(link.upcast(&5_i32).is_none());
}

#[test]
fn accessor_rejects_foreign_instance() {
	let info = base_type();
	let fault = info.member("tag").expect("tag exists").invoke(&true, &[]).expect_err("bool is not Base");
	assert_eq!(fault.kind(), FaultKind::Evaluation);
}

#[test]
fn root_members_apply_to_any_value() {
	let root = root_type();
	let text = "hello".to_owned();
	let name = root.member("type_name").expect("type_name exists").invoke(&text, &[]).expect("type_name evaluates");
	let name = name.expect("type_name is not null");
	assert_eq!(name.display(), "String");

	let shown = root.member("to_string").expect("to_string exists").invoke(&42_i64, &[]).expect("to_string evaluates");
	assert_eq!(shown.expect("to_string is not null").display(), "42");
}

#[test]
fn string_split_requires_argument_and_repeat_has_default() {
	let info = String::new().type_info();

	let split = info.member("split").expect("split exists");
	assert!(split.parameters[0].default.is_none());

	let repeat = info.member("repeat").expect("repeat exists");
	let default = repeat.parameters[0].default.clone();
	assert!(default.is_some());

	let text = "ab".to_owned();
	let repeated = repeat.invoke(&text, &[default]).expect("repeat evaluates").expect("repeat is not null");
	assert_eq!(repeated.display(), "ab");
}

#[test]
fn argument_helper_checks_presence_and_type() {
	let args: Vec<Option<Object>> = vec![Some(object(3_usize)), None];
	assert_eq!(argument::<usize>(&args, 0).copied().expect("usize argument"), 3);
	assert!(argument::<String>(&args, 0).is_err());
	assert!(argument::<usize>(&args, 1).is_err());
	assert!(argument::<usize>(&args, 2).is_err());
}

#[test]
fn optional_parameter_reports_default_type() {
	let parameter = ParameterInfo::optional("count", 2_i64);
	assert_eq!(parameter.type_name.as_ref(), "i64");
	let required = ParameterInfo::required("pattern", "String");
	assert!(required.default.is_none());
}

#[test]
fn list_exposes_iterable_view() {
	let list: Vec<Option<Object>> = vec![Some(object(1_i32)), None];
	let sequence = list.as_iterable().expect("list is iterable");
	assert_eq!(sequence.len_hint(), Some(2));
	assert_eq!(sequence.items().count(), 2);
	assert_eq!(list.display(), "List (2)");
}
