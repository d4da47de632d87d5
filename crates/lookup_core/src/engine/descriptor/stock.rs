use crate::engine::{Collector, Descriptor, DescriptorIdentity, Enumerator, Fault, Object, Reflect};

/// Descriptor for arbitrary values with no dedicated handling.
#[derive(Debug, Clone)]
pub struct ObjectDescriptor {
	identity: DescriptorIdentity,
}

impl ObjectDescriptor {
	/// Describe `value` from its type table.
	pub fn new(value: &dyn Reflect) -> Self {
		Self {
			identity: DescriptorIdentity::of(value),
		}
	}
}

impl<C> Descriptor<C> for ObjectDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}

	fn as_collector(&self) -> Option<&dyn Collector> {
		Some(self)
	}
}

impl Collector for ObjectDescriptor {}

/// Descriptor for `bool` values.
#[derive(Debug, Clone)]
pub struct BooleanDescriptor {
	identity: DescriptorIdentity,
}

impl BooleanDescriptor {
	/// Describe `value`.
	pub fn new(value: bool) -> Self {
		Self {
			identity: DescriptorIdentity::of(&value),
		}
	}
}

impl<C> Descriptor<C> for BooleanDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}
}

/// Descriptor for `String` values; the name is the text itself.
#[derive(Debug, Clone)]
pub struct StringDescriptor {
	identity: DescriptorIdentity,
}

impl StringDescriptor {
	/// Describe `text`.
	pub fn new(text: &str) -> Self {
		Self {
			identity: DescriptorIdentity::of(&String::new()).named(text),
		}
	}
}

impl<C> Descriptor<C> for StringDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}
}

/// Descriptor for iterable values.
#[derive(Debug, Clone)]
pub struct EnumerableDescriptor {
	identity: DescriptorIdentity,
	value: Object,
}

impl EnumerableDescriptor {
	/// Describe `value`, which should expose an iterable view.
	pub fn new(value: Object) -> Self {
		Self {
			identity: DescriptorIdentity::of(value.as_ref()),
			value,
		}
	}
}

impl<C> Descriptor<C> for EnumerableDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}

	fn as_enumerator(&self) -> Option<&dyn Enumerator> {
		Some(self)
	}
}

impl Enumerator for EnumerableDescriptor {
	fn is_empty(&self) -> bool {
		let Some(sequence) = self.value.as_iterable() else {
			return true;
		};
		match sequence.len_hint() {
			Some(len) => len == 0,
			None => sequence.items().next().is_none(),
		}
	}

	fn items(&self) -> Box<dyn Iterator<Item = Option<Object>> + '_> {
		match self.value.as_iterable() {
			Some(sequence) => sequence.items(),
			None => Box::new(std::iter::empty()),
		}
	}
}

/// Descriptor for fault values; the description carries the message.
#[derive(Debug, Clone)]
pub struct FaultDescriptor {
	identity: DescriptorIdentity,
}

impl FaultDescriptor {
	/// Describe `fault`.
	pub fn new(fault: &Fault) -> Self {
		Self {
			identity: DescriptorIdentity::of(fault).describe(fault.message()),
		}
	}
}

impl<C> Descriptor<C> for FaultDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}

	fn as_collector(&self) -> Option<&dyn Collector> {
		Some(self)
	}
}

impl Collector for FaultDescriptor {}

/// Descriptor for the null value.
#[derive(Debug, Clone)]
pub struct NullDescriptor {
	identity: DescriptorIdentity,
}

impl NullDescriptor {
	/// Describe null.
	pub fn new() -> Self {
		Self {
			identity: DescriptorIdentity::null(),
		}
	}
}

impl Default for NullDescriptor {
	fn default() -> Self {
		Self::new()
	}
}

impl<C> Descriptor<C> for NullDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}
}
