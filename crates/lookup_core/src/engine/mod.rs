mod allocation;
mod composer;
mod descriptor;
mod diagnoser;
mod error;
mod fault;
mod members;
mod model;
mod options;
mod reflect;
mod resolver;
mod variant;

/// Opt-in per-thread allocation counting.
pub use allocation::{CountingAllocator, ThreadAllocations, thread_allocated_bytes};
/// Decomposition entry points.
pub use composer::{
	decompose, decompose_many, decompose_members, decompose_members_typed, decompose_object, decompose_object_typed, decompose_typed,
};
/// Descriptor trait, capability traits, and stock descriptors.
pub use descriptor::{
	BooleanDescriptor, Collector, ContextExtension, ContextExtensionManager, ContextRedirector, ContextResolution, ContextResolver, Descriptor,
	DescriptorIdentity, EnumerableDescriptor, Enumerator, Extension, ExtensionManager, FaultDescriptor, NullDescriptor, ObjectDescriptor, Redirector,
	Resolution, Resolver, StringDescriptor,
};
/// Evaluation timing and allocation accounting.
pub use diagnoser::{AllocationCounter, ClockDiagnoser, Diagnoser, DiagnoserFactory, NoAllocations, NoopDiagnoser, clock_diagnoser, noop_diagnoser};
/// Error and result aliases.
pub use error::{EngineError, Result};
/// Member evaluation faults.
pub use fault::{Fault, FaultKind};
/// Decomposition result model.
pub use model::{DecomposedMember, DecomposedObject, DecomposedValue, MemberAttributes};
/// Per-call options.
pub use options::DecomposeOptions;
/// Runtime type tables and the reflected value trait.
pub use reflect::{
	Accessor, BaseLink, Evaluated, Iterable, MemberInfo, MemberKind, Object, ParameterInfo, Reflect, TypeBuilder, TypeInfo, Visibility, argument, evaluated,
	object, root_type,
};
/// Value to descriptor mapping.
pub use resolver::{TypeResolver, default_resolver, default_type_resolver};
/// Zero, one, or many member results.
pub use variant::{Variant, Variants, VariantsBuilder};
