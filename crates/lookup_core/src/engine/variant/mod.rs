use std::any::Any;
use std::sync::OnceLock;

use crate::engine::{Fault, Iterable, Object, Reflect, TypeInfo, evaluated, object};

/// One evaluated result with an optional description.
#[derive(Debug, Clone)]
pub struct Variant {
	/// Result value; `None` is null.
	pub value: Option<Object>,
	/// Text shown alongside the value.
	pub description: Option<String>,
}

impl Variant {
	/// Undescribed variant.
	pub fn new(value: Option<Object>) -> Self {
		Self { value, description: None }
	}

	/// Variant with a description.
	pub fn described(value: Option<Object>, description: impl Into<String>) -> Self {
		Self {
			value,
			description: Some(description.into()),
		}
	}
}

/// Zero, one, or many results produced for a member.
#[derive(Debug, Clone, Default)]
pub enum Variants {
	/// Nothing to show.
	#[default]
	Empty,
	/// Exactly one result, consumed as a bare value.
	Single(Variant),
	/// Several results, consumed as a collection.
	Many(Vec<Variant>),
}

impl Variants {
	/// Canonical zero-result value.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Builder sized for `capacity` results.
	pub fn values(capacity: usize) -> VariantsBuilder {
		VariantsBuilder::with_capacity(capacity)
	}

	/// Single result, collapsing to empty when `value` is an empty sequence.
	pub fn value<T: Reflect>(value: T) -> Self {
		let mut builder = VariantsBuilder::with_capacity(1);
		builder.add(value);
		builder.consume()
	}

	/// Single described result, collapsing to empty when `value` is an empty sequence.
	pub fn described<T: Reflect>(value: T, description: impl Into<String>) -> Self {
		let mut builder = VariantsBuilder::with_capacity(1);
		builder.add_described(value, description);
		builder.consume()
	}

	/// Marker for a member the descriptor refuses to evaluate.
	pub fn disabled() -> Self {
		Self::Single(Variant::new(Some(object(Fault::disabled()))))
	}

	/// Number of results.
	pub fn len(&self) -> usize {
		match self {
			Self::Empty => 0,
			Self::Single(_) => 1,
			Self::Many(items) => items.len(),
		}
	}

	/// Whether there is nothing to show.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Iterate results in insertion order.
	pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
		match self {
			Self::Empty => (&[] as &[Variant]).iter(),
			Self::Single(item) => std::slice::from_ref(item).iter(),
			Self::Many(items) => items.iter(),
		}
	}
}

/// Incremental builder for [`Variants`].
///
/// Null values and empty sequences are dropped on insertion so a member that
/// produced nothing collapses to [`Variants::Empty`].
#[derive(Debug, Default)]
pub struct VariantsBuilder {
	items: Vec<Variant>,
}

impl VariantsBuilder {
	/// Builder with reserved room for `capacity` results.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			items: Vec::with_capacity(capacity),
		}
	}

	/// Append a value.
	pub fn add<T: Reflect>(&mut self, value: T) -> &mut Self {
		self.push(Some(object(value)), None)
	}

	/// Append a described value.
	pub fn add_described<T: Reflect>(&mut self, value: T, description: impl Into<String>) -> &mut Self {
		self.push(Some(object(value)), Some(description.into()))
	}

	/// Append an already type-erased value; `None` is ignored.
	pub fn add_object(&mut self, value: Option<Object>) -> &mut Self {
		self.push(value, None)
	}

	/// Append an already type-erased value with an optional description.
	pub fn add_object_described(&mut self, value: Option<Object>, description: Option<String>) -> &mut Self {
		self.push(value, description)
	}

	/// Results added so far.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether nothing has been added.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Finish the collection.
	pub fn consume(mut self) -> Variants {
		match self.items.len() {
			0 => Variants::Empty,
			1 => self.items.pop().map(Variants::Single).unwrap_or_default(),
			_ => Variants::Many(self.items),
		}
	}

	fn push(&mut self, value: Option<Object>, description: Option<String>) -> &mut Self {
		let Some(value) = value else {
			return self;
		};
		if is_empty_sequence(value.as_ref()) {
			return self;
		}
		self.items.push(Variant {
			value: Some(value),
			description,
		});
		self
	}
}

fn is_empty_sequence(value: &dyn Reflect) -> bool {
	let Some(sequence) = value.as_iterable() else {
		return false;
	};
	match sequence.len_hint() {
		Some(len) => len == 0,
		None => sequence.items().next().is_none(),
	}
}

impl Reflect for Variants {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<Variants>("Variants")
				.property("len", |variants: &Variants| evaluated(variants.len()))
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> String {
		format!("Variants ({})", self.len())
	}

	fn as_iterable(&self) -> Option<&dyn Iterable> {
		Some(self)
	}
}

impl Iterable for Variants {
	fn len_hint(&self) -> Option<usize> {
		Some(self.len())
	}

	fn items(&self) -> Box<dyn Iterator<Item = Option<Object>> + '_> {
		Box::new(self.iter().map(|item| item.value.clone()))
	}
}
