use crate::engine::{Object, ParameterInfo, Reflect, Variants};

mod stock;

pub use stock::{BooleanDescriptor, EnumerableDescriptor, FaultDescriptor, NullDescriptor, ObjectDescriptor, StringDescriptor};

/// Deferred member evaluation supplied by a [`Resolver`].
pub type Resolution<'a> = Box<dyn FnOnce() -> Variants + 'a>;

/// Deferred member evaluation that receives the caller context.
pub type ContextResolution<'a, C> = Box<dyn FnOnce(&C) -> Variants + 'a>;

/// Name and type labels carried by every descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorIdentity {
	/// Display name of the described value.
	pub name: String,
	/// Short type name.
	pub type_name: Box<str>,
	/// Fully qualified type name.
	pub type_full_name: Box<str>,
	/// Optional annotation shown next to the value.
	pub description: Option<String>,
}

impl DescriptorIdentity {
	/// Identity labelled from the value's own type table and display text.
	pub fn of(value: &dyn Reflect) -> Self {
		let info = value.type_info();
		Self {
			name: value.display(),
			type_name: info.name().into(),
			type_full_name: info.full_name().into(),
			description: None,
		}
	}

	/// Identity of the null value.
	pub fn null() -> Self {
		Self {
			name: "<null>".to_owned(),
			type_name: "null".into(),
			type_full_name: "null".into(),
			description: None,
		}
	}

	/// Replace the display name.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Attach a description.
	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Per-value customization point consulted while decomposing.
///
/// Capabilities are optional; each `as_*` query returns `Some` when the
/// descriptor implements the matching trait. `C` is the caller context type
/// threaded through context-aware capabilities.
pub trait Descriptor<C = ()>: Send + Sync {
	/// Name and type labels.
	fn identity(&self) -> &DescriptorIdentity;

	/// Member evaluation overrides.
	fn as_resolver(&self) -> Option<&dyn Resolver> {
		None
	}

	/// Member evaluation overrides that read the caller context.
	fn as_context_resolver(&self) -> Option<&dyn ContextResolver<C>> {
		None
	}

	/// Member value substitution.
	fn as_redirector(&self) -> Option<&dyn Redirector> {
		None
	}

	/// Member value substitution that reads the caller context.
	fn as_context_redirector(&self) -> Option<&dyn ContextRedirector<C>> {
		None
	}

	/// Synthetic members.
	fn as_extension(&self) -> Option<&dyn Extension> {
		None
	}

	/// Synthetic members evaluated against the caller context.
	fn as_context_extension(&self) -> Option<&dyn ContextExtension<C>> {
		None
	}

	/// Sequence access for iterable values.
	fn as_enumerator(&self) -> Option<&dyn Enumerator> {
		None
	}

	/// Marker for values that aggregate members worth expanding.
	fn as_collector(&self) -> Option<&dyn Collector> {
		None
	}
}

/// Intercepts members before default evaluation.
pub trait Resolver {
	/// Evaluation override for `target`, or `None` to fall through.
	fn resolve(&self, target: &str, parameters: &[ParameterInfo]) -> Option<Resolution<'_>>;
}

/// Context-aware form of [`Resolver`].
pub trait ContextResolver<C> {
	/// Evaluation override for `target`, or `None` to fall through.
	fn resolve(&self, target: &str, parameters: &[ParameterInfo]) -> Option<ContextResolution<'_, C>>;
}

/// Replaces a member's value without running its accessor.
pub trait Redirector {
	/// Substitute for `target`, or `None` to decline.
	fn try_redirect(&self, target: &str) -> Option<Object>;
}

/// Context-aware form of [`Redirector`].
pub trait ContextRedirector<C> {
	/// Substitute for `target`, or `None` to decline.
	fn try_redirect(&self, target: &str, context: &C) -> Option<Object>;
}

/// Adds synthetic members.
pub trait Extension {
	/// Register factories on `manager`.
	fn register_extensions<'a>(&'a self, manager: &mut ExtensionManager<'a>);
}

/// Adds synthetic members evaluated against the caller context.
pub trait ContextExtension<C> {
	/// Register factories on `manager`.
	fn register_extensions<'a>(&'a self, manager: &mut ContextExtensionManager<'a, C>);
}

/// Sequence view exposed by descriptors of iterable values.
pub trait Enumerator {
	/// Whether the sequence has no elements; walks at most one element.
	fn is_empty(&self) -> bool;

	/// Iterate the wrapped sequence.
	fn items(&self) -> Box<dyn Iterator<Item = Option<Object>> + '_>;
}

/// Marker capability for member-aggregating values.
pub trait Collector {}

/// Collects context-free extension factories.
#[derive(Default)]
pub struct ExtensionManager<'a> {
	entries: Vec<(Box<str>, Resolution<'a>)>,
}

impl<'a> ExtensionManager<'a> {
	/// Empty manager.
	pub fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Register a synthetic member named `name`.
	pub fn register(&mut self, name: &str, factory: impl FnOnce() -> Variants + 'a) -> &mut Self {
		self.entries.push((name.into(), Box::new(factory)));
		self
	}

	/// Number of registered members.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing was registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(crate) fn into_entries(self) -> Vec<(Box<str>, Resolution<'a>)> {
		self.entries
	}
}

/// Collects context-bound extension factories.
pub struct ContextExtensionManager<'a, C> {
	entries: Vec<(Box<str>, ContextResolution<'a, C>)>,
}

impl<'a, C> ContextExtensionManager<'a, C> {
	/// Empty manager.
	pub fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Register a synthetic member named `name` evaluated against the context.
	pub fn register(&mut self, name: &str, factory: impl FnOnce(&C) -> Variants + 'a) -> &mut Self {
		self.entries.push((name.into(), Box::new(factory)));
		self
	}

	/// Number of registered members.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing was registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(crate) fn into_entries(self) -> Vec<(Box<str>, ContextResolution<'a, C>)> {
		self.entries
	}
}

impl<C> Default for ContextExtensionManager<'_, C> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests;
