use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use super::{Accessor, Iterable, MemberKind, Object, ParameterInfo, Reflect, TypeData, TypeInfo, argument, evaluated, object, untyped_member};

/// Marker for the universal root type every hierarchy ends at.
struct Root;

/// Type table of the universal root type.
///
/// Its members apply to every value and only appear when root inclusion is on.
pub fn root_type() -> TypeInfo {
	static ROOT: OnceLock<TypeInfo> = OnceLock::new();
	ROOT.get_or_init(|| {
		let type_name: Accessor = Arc::new(|instance: &dyn Reflect, _: &[Option<Object>]| evaluated(instance.type_info().name().to_owned()));
		let full_name: Accessor = Arc::new(|instance: &dyn Reflect, _: &[Option<Object>]| evaluated(instance.type_info().full_name().to_owned()));
		let to_string: Accessor = Arc::new(|instance: &dyn Reflect, _: &[Option<Object>]| evaluated(instance.display()));
		TypeInfo(Arc::new(TypeData {
			name: "object".into(),
			full_name: "lookup::object".into(),
			type_id: TypeId::of::<Root>(),
			base: None,
			members: vec![
				untyped_member("type_name", MemberKind::Method, type_name),
				untyped_member("type_full_name", MemberKind::Method, full_name),
				untyped_member("to_string", MemberKind::Method, to_string),
			],
		}))
	})
	.clone()
}

impl Reflect for bool {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| TypeInfo::builder::<bool>("bool").full_name("core::primitive::bool").build()).clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> String {
		self.to_string()
	}
}

macro_rules! reflect_number {
	($($ty:ty),* $(,)?) => {
		$(
			impl Reflect for $ty {
				fn type_info(&self) -> TypeInfo {
					static INFO: OnceLock<TypeInfo> = OnceLock::new();
					INFO.get_or_init(|| {
						TypeInfo::builder::<$ty>(stringify!($ty))
							.full_name(concat!("core::primitive::", stringify!($ty)))
							.build()
					})
					.clone()
				}

				fn as_any(&self) -> &dyn Any {
					self
				}

				fn display(&self) -> String {
					self.to_string()
				}
			}
		)*
	};
}

reflect_number!(i32, i64, u64, usize, f64);

impl Reflect for String {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<String>("String")
				.full_name("alloc::string::String")
				.property("len", |text: &String| evaluated(text.len()))
				.property("is_empty", |text: &String| evaluated(text.is_empty()))
				.method("to_uppercase", |text: &String| evaluated(text.to_uppercase()))
				.method("to_lowercase", |text: &String| evaluated(text.to_lowercase()))
				.method("trim", |text: &String| evaluated(text.trim().to_owned()))
				.method("chars", |text: &String| {
					let chars = text.chars().map(|ch| Some(object(ch.to_string()))).collect::<Vec<_>>();
					evaluated(chars)
				})
				.method_with("split", vec![ParameterInfo::required("pattern", "String")], |text: &String, args| {
					let pattern = argument::<String>(args, 0)?;
					let parts = text.split(pattern.as_str()).map(|part| Some(object(part.to_owned()))).collect::<Vec<_>>();
					evaluated(parts)
				})
				.method_with("repeat", vec![ParameterInfo::optional("count", 1_usize)], |text: &String, args| {
					let count = argument::<usize>(args, 0)?;
					evaluated(text.repeat(*count))
				})
				.field("capacity", |text: &String| evaluated(text.capacity()))
				.private()
				.method("new", |_: &String| evaluated(String::new()))
				.static_member()
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> String {
		self.clone()
	}
}

impl Reflect for Vec<Option<Object>> {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<Vec<Option<Object>>>("List")
				.full_name("alloc::vec::Vec<lookup::Object>")
				.property("len", |items: &Vec<Option<Object>>| evaluated(items.len()))
				.property("is_empty", |items: &Vec<Option<Object>>| evaluated(items.is_empty()))
				.method("first", |items: &Vec<Option<Object>>| Ok(items.first().cloned().flatten()))
				.method("last", |items: &Vec<Option<Object>>| Ok(items.last().cloned().flatten()))
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> String {
		format!("List ({})", self.len())
	}

	fn as_iterable(&self) -> Option<&dyn Iterable> {
		Some(self)
	}
}

impl Iterable for Vec<Option<Object>> {
	fn len_hint(&self) -> Option<usize> {
		Some(self.len())
	}

	fn items(&self) -> Box<dyn Iterator<Item = Option<Object>> + '_> {
		Box::new(self.iter().cloned())
	}
}
