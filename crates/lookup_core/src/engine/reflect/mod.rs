use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::engine::Fault;

mod builtin;

pub use builtin::root_type;

/// Dynamically typed value handle walked by the engine.
pub type Object = Arc<dyn Reflect>;

/// Outcome of invoking one member accessor.
pub type Evaluated = std::result::Result<Option<Object>, Fault>;

/// Type-erased member accessor: receives the instance and filled-in arguments.
pub type Accessor = Arc<dyn Fn(&dyn Reflect, &[Option<Object>]) -> Evaluated + Send + Sync>;

/// Wrap a concrete value into an [`Object`].
pub fn object<T: Reflect>(value: T) -> Object {
	Arc::new(value)
}

/// Successful accessor result holding `value`.
pub fn evaluated<T: Reflect>(value: T) -> Evaluated {
	Ok(Some(object(value)))
}

/// Borrow positional argument `index` as a concrete type.
pub fn argument<T: Reflect>(args: &[Option<Object>], index: usize) -> std::result::Result<&T, Fault> {
	let Some(Some(value)) = args.get(index) else {
		return Err(Fault::evaluation(format!("missing argument {index}")));
	};
	value
		.as_any()
		.downcast_ref::<T>()
		.ok_or_else(|| Fault::evaluation(format!("argument {index} is not {}", std::any::type_name::<T>())))
}

/// Values the engine can decompose.
///
/// Implementors publish a [`TypeInfo`] table describing their members; the
/// engine never inspects concrete types beyond what that table exposes.
pub trait Reflect: Any + Send + Sync + fmt::Debug {
	/// Runtime type table for this value.
	fn type_info(&self) -> TypeInfo;

	/// Upcast used by accessors to recover the concrete type.
	fn as_any(&self) -> &dyn Any;

	/// Display text, used as the default descriptor name.
	fn display(&self) -> String {
		self.type_info().name().to_owned()
	}

	/// Sequence view when the value wraps an iterable.
	fn as_iterable(&self) -> Option<&dyn Iterable> {
		None
	}

	/// Fault view when the value is an error value.
	fn as_fault(&self) -> Option<&Fault> {
		None
	}
}

/// Sequence view over a reflected value.
pub trait Iterable {
	/// Element count, when known without walking the sequence.
	fn len_hint(&self) -> Option<usize>;

	/// Iterate the elements.
	fn items(&self) -> Box<dyn Iterator<Item = Option<Object>> + '_>;
}

/// Kind of operation a member exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
	/// Callable operation, possibly with parameters.
	Method,
	/// Computed getter.
	Property,
	/// Stored data.
	Field,
	/// Subscription point; evaluates to its current subscribers.
	Event,
}

/// Member accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// Reachable by any caller.
	Public,
	/// Internal to the declaring type.
	Private,
}

/// One declared parameter of a method member.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
	/// Parameter name.
	pub name: Box<str>,
	/// Display name of the parameter type.
	pub type_name: Box<str>,
	/// Value used when the engine invokes the method without caller input.
	pub default: Option<Object>,
}

impl ParameterInfo {
	/// Parameter without a default; methods declaring one are not invoked by default evaluation.
	pub fn required(name: &str, type_name: &str) -> Self {
		Self {
			name: name.into(),
			type_name: type_name.into(),
			default: None,
		}
	}

	/// Parameter filled with `default` during default evaluation.
	pub fn optional<T: Reflect>(name: &str, default: T) -> Self {
		let default = object(default);
		Self {
			name: name.into(),
			type_name: default.type_info().name().into(),
			default: Some(default),
		}
	}
}

/// One declared member of a type.
#[derive(Clone)]
pub struct MemberInfo {
	/// Member name.
	pub name: Box<str>,
	/// Operation kind.
	pub kind: MemberKind,
	/// Accessibility.
	pub visibility: Visibility,
	/// Whether the member belongs to the type rather than an instance.
	pub is_static: bool,
	/// Declared parameters, in order.
	pub parameters: Vec<ParameterInfo>,
	accessor: Accessor,
}

impl MemberInfo {
	/// Invoke the accessor against `instance`.
	pub fn invoke(&self, instance: &dyn Reflect, args: &[Option<Object>]) -> Evaluated {
		(self.accessor)(instance, args)
	}
}

impl fmt::Debug for MemberInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberInfo")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("visibility", &self.visibility)
			.field("is_static", &self.is_static)
			.field("parameters", &self.parameters)
			.finish_non_exhaustive()
	}
}

/// View of an instance as its base type.
trait Upcast: Send + Sync {
	fn upcast<'v>(&self, value: &'v dyn Reflect) -> Option<&'v dyn Reflect>;
}

struct Projection<T, B>(fn(&T) -> &B);

impl<T: Reflect, B: Reflect> Upcast for Projection<T, B> {
	fn upcast<'v>(&self, value: &'v dyn Reflect) -> Option<&'v dyn Reflect> {
		let derived = value.as_any().downcast_ref::<T>()?;
		Some((self.0)(derived))
	}
}

/// The root type accepts any instance as-is.
struct Identity;

impl Upcast for Identity {
	fn upcast<'v>(&self, value: &'v dyn Reflect) -> Option<&'v dyn Reflect> {
		Some(value)
	}
}

/// Link from a type to its base type.
#[derive(Clone)]
pub struct BaseLink {
	info: TypeInfo,
	upcast: Arc<dyn Upcast>,
}

impl BaseLink {
	/// Base type table.
	pub fn info(&self) -> &TypeInfo {
		&self.info
	}

	/// View `value` as an instance of the base type.
	pub fn upcast<'v>(&self, value: &'v dyn Reflect) -> Option<&'v dyn Reflect> {
		self.upcast.upcast(value)
	}
}

struct TypeData {
	name: Box<str>,
	full_name: Box<str>,
	type_id: TypeId,
	base: Option<BaseLink>,
	members: Vec<MemberInfo>,
}

/// Runtime type table. Cheap to clone.
#[derive(Clone)]
pub struct TypeInfo(Arc<TypeData>);

impl TypeInfo {
	/// Start a type table for `T`.
	pub fn builder<T: Reflect>(name: &str) -> TypeBuilder<T> {
		TypeBuilder::new(name)
	}

	/// Short type name.
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Fully qualified type name.
	pub fn full_name(&self) -> &str {
		&self.0.full_name
	}

	/// Rust type id of the described type.
	pub fn type_id(&self) -> TypeId {
		self.0.type_id
	}

	/// Whether this table describes exactly `T`.
	pub fn is<T: 'static>(&self) -> bool {
		self.0.type_id == TypeId::of::<T>()
	}

	/// Base type link, absent only for the root type.
	pub fn base(&self) -> Option<&BaseLink> {
		self.0.base.as_ref()
	}

	/// Members declared by this type, excluding inherited ones.
	pub fn members(&self) -> &[MemberInfo] {
		&self.0.members
	}

	/// Look up a declared member by name.
	pub fn member(&self, name: &str) -> Option<&MemberInfo> {
		self.0.members.iter().find(|member| member.name.as_ref() == name)
	}
}

impl PartialEq for TypeInfo {
	fn eq(&self, other: &Self) -> bool {
		self.0.type_id == other.0.type_id
	}
}

impl fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeInfo")
			.field("name", &self.0.name)
			.field("full_name", &self.0.full_name)
			.field("base", &self.base().map(|link| link.info.full_name()))
			.field("members", &self.0.members.len())
			.finish()
	}
}

/// Fluent builder for [`TypeInfo`] tables.
///
/// Modifiers such as [`private`](Self::private) apply to the member added last.
pub struct TypeBuilder<T> {
	name: Box<str>,
	full_name: Box<str>,
	base: Option<BaseLink>,
	members: Vec<MemberInfo>,
	_marker: PhantomData<fn(&T)>,
}

impl<T: Reflect> TypeBuilder<T> {
	/// New table for `T` whose base is the root type.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.into(),
			full_name: std::any::type_name::<T>().into(),
			base: Some(BaseLink {
				info: root_type(),
				upcast: Arc::new(Identity),
			}),
			members: Vec::new(),
			_marker: PhantomData,
		}
	}

	/// Override the fully qualified name.
	pub fn full_name(mut self, full_name: &str) -> Self {
		self.full_name = full_name.into();
		self
	}

	/// Declare `base` as the parent type; `project` borrows the embedded base value.
	pub fn base<B: Reflect>(mut self, base: TypeInfo, project: fn(&T) -> &B) -> Self {
		self.base = Some(BaseLink {
			info: base,
			upcast: Arc::new(Projection(project)),
		});
		self
	}

	/// Declare a getter property.
	pub fn property<F>(self, name: &str, get: F) -> Self
	where
		F: Fn(&T) -> Evaluated + Send + Sync + 'static,
	{
		self.push(name, MemberKind::Property, Vec::new(), move |this, _| get(this))
	}

	/// Declare a stored field.
	pub fn field<F>(self, name: &str, get: F) -> Self
	where
		F: Fn(&T) -> Evaluated + Send + Sync + 'static,
	{
		self.push(name, MemberKind::Field, Vec::new(), move |this, _| get(this))
	}

	/// Declare an event; the accessor reports its current subscribers.
	pub fn event<F>(self, name: &str, get: F) -> Self
	where
		F: Fn(&T) -> Evaluated + Send + Sync + 'static,
	{
		self.push(name, MemberKind::Event, Vec::new(), move |this, _| get(this))
	}

	/// Declare a parameterless method.
	pub fn method<F>(self, name: &str, call: F) -> Self
	where
		F: Fn(&T) -> Evaluated + Send + Sync + 'static,
	{
		self.push(name, MemberKind::Method, Vec::new(), move |this, _| call(this))
	}

	/// Declare a method with parameters.
	pub fn method_with<F>(self, name: &str, parameters: Vec<ParameterInfo>, call: F) -> Self
	where
		F: Fn(&T, &[Option<Object>]) -> Evaluated + Send + Sync + 'static,
	{
		self.push(name, MemberKind::Method, parameters, call)
	}

	/// Mark the last declared member private.
	pub fn private(mut self) -> Self {
		if let Some(member) = self.members.last_mut() {
			member.visibility = Visibility::Private;
		}
		self
	}

	/// Mark the last declared member static.
	pub fn static_member(mut self) -> Self {
		if let Some(member) = self.members.last_mut() {
			member.is_static = true;
		}
		self
	}

	/// Finish the table.
	pub fn build(self) -> TypeInfo {
		TypeInfo(Arc::new(TypeData {
			name: self.name,
			full_name: self.full_name,
			type_id: TypeId::of::<T>(),
			base: self.base,
			members: self.members,
		}))
	}

	fn push<F>(mut self, name: &str, kind: MemberKind, parameters: Vec<ParameterInfo>, call: F) -> Self
	where
		F: Fn(&T, &[Option<Object>]) -> Evaluated + Send + Sync + 'static,
	{
		let type_name = self.name.clone();
		let accessor: Accessor = Arc::new(move |instance: &dyn Reflect, args: &[Option<Object>]| {
			let this = instance
				.as_any()
				.downcast_ref::<T>()
				.ok_or_else(|| Fault::evaluation(format!("instance is not a {type_name}")))?;
			call(this, args)
		});
		self.members.push(MemberInfo {
			name: name.into(),
			kind,
			visibility: Visibility::Public,
			is_static: false,
			parameters,
			accessor,
		});
		self
	}
}

fn untyped_member(name: &str, kind: MemberKind, accessor: Accessor) -> MemberInfo {
	MemberInfo {
		name: name.into(),
		kind,
		visibility: Visibility::Public,
		is_static: false,
		parameters: Vec::new(),
		accessor,
	}
}

#[cfg(test)]
mod tests;
