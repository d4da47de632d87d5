use std::fmt;
use std::time::Duration;

use bitflags::bitflags;

use crate::engine::{Descriptor, MemberInfo, MemberKind, Object, Visibility};

bitflags! {
	/// Kind and modifier flags of a decomposed member.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct MemberAttributes: u16 {
		/// Callable operation.
		const METHOD = 1 << 0;
		/// Computed getter.
		const PROPERTY = 1 << 1;
		/// Stored data.
		const FIELD = 1 << 2;
		/// Subscription point.
		const EVENT = 1 << 3;
		/// Belongs to the type rather than the instance.
		const STATIC = 1 << 4;
		/// Not publicly accessible.
		const PRIVATE = 1 << 5;
		/// Evaluation faulted or produced nothing.
		const UNSUPPORTED = 1 << 6;
		/// Synthetic member added by a descriptor extension.
		const EXTENSION = 1 << 7;
	}
}

impl MemberAttributes {
	/// Flags describing a declared member.
	pub fn of(member: &MemberInfo) -> Self {
		let mut attributes = match member.kind {
			MemberKind::Method => Self::METHOD,
			MemberKind::Property => Self::PROPERTY,
			MemberKind::Field => Self::FIELD,
			MemberKind::Event => Self::EVENT,
		};
		if member.is_static {
			attributes |= Self::STATIC;
		}
		if member.visibility == Visibility::Private {
			attributes |= Self::PRIVATE;
		}
		attributes
	}
}

/// Evaluated result of one member; not expanded further until asked.
pub struct DecomposedValue<C = ()> {
	pub(crate) raw_value: Option<Object>,
	pub(crate) name: String,
	pub(crate) type_name: Box<str>,
	pub(crate) type_full_name: Box<str>,
	pub(crate) description: Option<String>,
	pub(crate) descriptor: Option<Box<dyn Descriptor<C>>>,
}

impl<C> DecomposedValue<C> {
	/// The evaluated value.
	pub fn raw_value(&self) -> Option<&Object> {
		self.raw_value.as_ref()
	}

	/// Display name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Short type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Fully qualified type name.
	pub fn type_full_name(&self) -> &str {
		&self.type_full_name
	}

	/// Annotation from the producing variant or the descriptor.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Descriptor resolved for the value.
	pub fn descriptor(&self) -> Option<&dyn Descriptor<C>> {
		self.descriptor.as_deref()
	}

	/// Whether the value's descriptor aggregates members.
	pub fn is_collector(&self) -> bool {
		self.descriptor().is_some_and(|descriptor| descriptor.as_collector().is_some())
	}

	/// Whether drilling into the value can show anything: a collector or a non-empty sequence.
	pub fn is_expandable(&self) -> bool {
		let Some(descriptor) = self.descriptor() else {
			return false;
		};
		if let Some(enumerator) = descriptor.as_enumerator() {
			return !enumerator.is_empty();
		}
		descriptor.as_collector().is_some()
	}
}

impl<C> fmt::Debug for DecomposedValue<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DecomposedValue")
			.field("raw_value", &self.raw_value)
			.field("name", &self.name)
			.field("type_name", &self.type_name)
			.field("type_full_name", &self.type_full_name)
			.field("description", &self.description)
			.finish_non_exhaustive()
	}
}

/// One accessible operation of a decomposed object.
pub struct DecomposedMember<C = ()> {
	pub(crate) depth: usize,
	pub(crate) name: Box<str>,
	pub(crate) declaring_type_name: Box<str>,
	pub(crate) declaring_type_full_name: Box<str>,
	pub(crate) computation_time: Duration,
	pub(crate) allocated_bytes: u64,
	pub(crate) attributes: MemberAttributes,
	pub(crate) value: DecomposedValue<C>,
}

impl<C> DecomposedMember<C> {
	/// Hierarchy level the member was found on; the outermost walked type is 0.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Member name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Short name of the declaring type.
	pub fn declaring_type_name(&self) -> &str {
		&self.declaring_type_name
	}

	/// Fully qualified name of the declaring type.
	pub fn declaring_type_full_name(&self) -> &str {
		&self.declaring_type_full_name
	}

	/// Time spent evaluating the member.
	pub fn computation_time(&self) -> Duration {
		self.computation_time
	}

	/// Bytes allocated while evaluating the member; zero without a counter.
	pub fn allocated_bytes(&self) -> u64 {
		self.allocated_bytes
	}

	/// Kind and modifier flags.
	pub fn attributes(&self) -> MemberAttributes {
		self.attributes
	}

	/// Whether evaluation faulted or produced nothing.
	pub fn is_unsupported(&self) -> bool {
		self.attributes.contains(MemberAttributes::UNSUPPORTED)
	}

	/// Evaluated value.
	pub fn value(&self) -> &DecomposedValue<C> {
		&self.value
	}
}

impl<C> fmt::Debug for DecomposedMember<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DecomposedMember")
			.field("depth", &self.depth)
			.field("name", &self.name)
			.field("declaring_type_name", &self.declaring_type_name)
			.field("computation_time", &self.computation_time)
			.field("allocated_bytes", &self.allocated_bytes)
			.field("attributes", &self.attributes)
			.field("value", &self.value)
			.finish()
	}
}

/// A decomposed value with its identity labels and members.
pub struct DecomposedObject<C = ()> {
	pub(crate) raw_value: Option<Object>,
	pub(crate) name: String,
	pub(crate) type_name: Box<str>,
	pub(crate) type_full_name: Box<str>,
	pub(crate) description: Option<String>,
	pub(crate) descriptor: Option<Box<dyn Descriptor<C>>>,
	pub(crate) members: Vec<DecomposedMember<C>>,
}

impl<C> DecomposedObject<C> {
	/// The decomposed value.
	pub fn raw_value(&self) -> Option<&Object> {
		self.raw_value.as_ref()
	}

	/// Display name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Short type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Fully qualified type name.
	pub fn type_full_name(&self) -> &str {
		&self.type_full_name
	}

	/// Optional annotation.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Attach or replace the annotation.
	pub fn set_description(&mut self, description: impl Into<String>) {
		self.description = Some(description.into());
	}

	/// Descriptor resolved for the value.
	pub fn descriptor(&self) -> Option<&dyn Descriptor<C>> {
		self.descriptor.as_deref()
	}

	/// Members in hierarchy order; empty for shallow decompositions.
	pub fn members(&self) -> &[DecomposedMember<C>] {
		&self.members
	}

	/// First member named `name`.
	pub fn member(&self, name: &str) -> Option<&DecomposedMember<C>> {
		self.members.iter().find(|member| member.name.as_ref() == name)
	}
}

impl<C> fmt::Debug for DecomposedObject<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DecomposedObject")
			.field("raw_value", &self.raw_value)
			.field("name", &self.name)
			.field("type_name", &self.type_name)
			.field("type_full_name", &self.type_full_name)
			.field("description", &self.description)
			.field("members", &self.members)
			.finish_non_exhaustive()
	}
}
