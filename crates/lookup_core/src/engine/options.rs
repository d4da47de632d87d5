use std::sync::Arc;

use crate::engine::{AllocationCounter, Descriptor, DiagnoserFactory, NoAllocations, Object, TypeInfo, TypeResolver, clock_diagnoser, default_resolver};

/// Inclusion switches and collaborators for one decomposition call.
///
/// `C` is a caller context handed to every context-aware capability; `()`
/// is the context-free form.
pub struct DecomposeOptions<C = ()> {
	/// Value to descriptor mapping.
	pub type_resolver: TypeResolver<C>,
	/// Walk base types up to the root type, not just the runtime type.
	pub include_root: bool,
	/// Include stored fields.
	pub include_fields: bool,
	/// Include events.
	pub include_events: bool,
	/// Emit members that faulted or produced nothing, flagged unsupported.
	pub include_unsupported: bool,
	/// Include private members.
	pub include_private_members: bool,
	/// Include static members.
	pub include_static_members: bool,
	/// Add synthetic members registered by descriptor extensions.
	pub enable_extensions: bool,
	/// Let descriptors substitute member values.
	pub enable_redirection: bool,
	/// Builds the per-call diagnoser.
	pub diagnoser: DiagnoserFactory,
	/// Caller context.
	pub context: C,
}

impl Default for DecomposeOptions {
	fn default() -> Self {
		Self::new(())
	}
}

impl<C: 'static> DecomposeOptions<C> {
	/// Default switches with `context`: only public instance members of the runtime type.
	pub fn new(context: C) -> Self {
		Self {
			type_resolver: default_resolver(),
			include_root: false,
			include_fields: false,
			include_events: false,
			include_unsupported: false,
			include_private_members: false,
			include_static_members: false,
			enable_extensions: false,
			enable_redirection: true,
			diagnoser: clock_diagnoser(Arc::new(NoAllocations)),
			context,
		}
	}

	/// Preset for interactive inspection: every inclusion switch on.
	pub fn for_inspection(context: C) -> Self {
		Self {
			include_root: true,
			include_fields: true,
			include_events: true,
			include_unsupported: true,
			include_private_members: true,
			include_static_members: true,
			enable_extensions: true,
			..Self::new(context)
		}
	}

	/// Replace the type resolver.
	pub fn with_type_resolver<F>(mut self, resolver: F) -> Self
	where
		F: Fn(Option<&Object>, Option<&TypeInfo>) -> Box<dyn Descriptor<C>> + Send + Sync + 'static,
	{
		self.type_resolver = Arc::new(resolver);
		self
	}

	/// Time members with wall-clock readings and allocations from `counter`.
	pub fn with_allocation_counter(mut self, counter: Arc<dyn AllocationCounter>) -> Self {
		self.diagnoser = clock_diagnoser(counter);
		self
	}

	/// Replace the diagnoser factory.
	pub fn with_diagnoser(mut self, diagnoser: DiagnoserFactory) -> Self {
		self.diagnoser = diagnoser;
		self
	}
}

impl<C: Clone> Clone for DecomposeOptions<C> {
	fn clone(&self) -> Self {
		Self {
			type_resolver: self.type_resolver.clone(),
			include_root: self.include_root,
			include_fields: self.include_fields,
			include_events: self.include_events,
			include_unsupported: self.include_unsupported,
			include_private_members: self.include_private_members,
			include_static_members: self.include_static_members,
			enable_extensions: self.enable_extensions,
			enable_redirection: self.enable_redirection,
			diagnoser: self.diagnoser.clone(),
			context: self.context.clone(),
		}
	}
}
