use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tracing::{debug, trace};

use crate::engine::{
	ContextExtensionManager, DecomposeOptions, DecomposedMember, DecomposedValue, Descriptor, Diagnoser, EngineError, ExtensionManager, Fault,
	MemberAttributes, MemberInfo, MemberKind, Object, Reflect, Result, TypeInfo, Variant, Variants, Visibility, object,
};

/// One walked level of a value's type hierarchy.
#[derive(Clone)]
pub(crate) struct Level<'v> {
	pub info: TypeInfo,
	pub instance: &'v dyn Reflect,
}

/// Levels to walk for `value`, outermost base first.
///
/// Without `include_root` only the runtime type is walked.
pub(crate) fn type_hierarchy(value: &dyn Reflect, include_root: bool) -> Result<Vec<Level<'_>>> {
	let mut info = value.type_info();
	let mut instance = value;
	let mut levels = vec![Level {
		info: info.clone(),
		instance,
	}];

	if include_root {
		while let Some(link) = info.base().cloned() {
			instance = link.upcast(instance).ok_or_else(|| EngineError::BrokenHierarchy {
				type_name: info.full_name().to_owned(),
				base_name: link.info().full_name().to_owned(),
			})?;
			info = link.info().clone();
			levels.push(Level {
				info: info.clone(),
				instance,
			});
		}
		levels.reverse();
	}

	Ok(levels)
}

/// Which strategy produced a member's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
	Redirected,
	Resolved,
	Evaluated,
	Extension,
}

enum Outcome {
	Values(Variants),
	Fault(Fault),
}

struct Reading {
	outcome: Outcome,
	elapsed: Duration,
	allocated: u64,
}

/// Walks members of one value for one decomposition call.
pub(crate) struct MemberEnumerator<'o, C> {
	options: &'o DecomposeOptions<C>,
	diagnoser: Box<dyn Diagnoser>,
	members: Vec<DecomposedMember<C>>,
}

impl<'o, C> MemberEnumerator<'o, C> {
	pub(crate) fn new(options: &'o DecomposeOptions<C>) -> Self {
		Self {
			options,
			diagnoser: (options.diagnoser)(),
			members: Vec::new(),
		}
	}

	/// Decompose every visible member of `value`.
	///
	/// `static_type` replaces the runtime type when resolving the descriptor of
	/// the runtime-type level; base levels always resolve with their own type.
	pub(crate) fn enumerate(mut self, value: &Object, static_type: Option<&TypeInfo>) -> Result<Vec<DecomposedMember<C>>> {
		let levels = type_hierarchy(value.as_ref(), self.options.include_root)?;
		let runtime_depth = levels.len() - 1;

		for (depth, level) in levels.iter().enumerate() {
			let resolve_as = match static_type {
				Some(hint) if depth == runtime_depth => hint,
				_ => &level.info,
			};
			let descriptor = (self.options.type_resolver)(Some(value), Some(resolve_as));
			let level_start = self.members.len();

			for member in level.info.members() {
				if !self.is_visible(member) {
					continue;
				}
				let (source, reading) = self.evaluate(level, member, &*descriptor);
				self.emit(depth, &level.info, &member.name, MemberAttributes::of(member), source, reading);
			}

			if self.options.enable_extensions {
				self.extend(depth, &level.info, &*descriptor, level_start);
			}
		}

		Ok(self.members)
	}

	fn is_visible(&self, member: &MemberInfo) -> bool {
		let options = self.options;
		if member.is_static && !options.include_static_members {
			return false;
		}
		if member.visibility == Visibility::Private && !options.include_private_members {
			return false;
		}
		match member.kind {
			MemberKind::Field => options.include_fields,
			MemberKind::Event => options.include_events,
			MemberKind::Method | MemberKind::Property => true,
		}
	}

	/// Redirection, then resolution, then the member's own accessor.
	fn evaluate(&mut self, level: &Level<'_>, member: &MemberInfo, descriptor: &dyn Descriptor<C>) -> (Source, Reading) {
		let options = self.options;
		let name = member.name.as_ref();

		if options.enable_redirection {
			if let Some(redirector) = descriptor.as_context_redirector() {
				let reading = self.measure(|| redirector.try_redirect(name, &options.context).map(redirected));
				if let Some(reading) = reading {
					return (Source::Redirected, reading);
				}
			}
			if let Some(redirector) = descriptor.as_redirector() {
				let reading = self.measure(|| redirector.try_redirect(name).map(redirected));
				if let Some(reading) = reading {
					return (Source::Redirected, reading);
				}
			}
		}

		if let Some(resolver) = descriptor.as_context_resolver() {
			if let Some(factory) = resolver.resolve(name, &member.parameters) {
				return (Source::Resolved, self.measure_outcome(|| Outcome::Values(factory(&options.context))));
			}
		}
		if let Some(resolver) = descriptor.as_resolver() {
			if let Some(factory) = resolver.resolve(name, &member.parameters) {
				return (Source::Resolved, self.measure_outcome(|| Outcome::Values(factory())));
			}
		}

		(Source::Evaluated, self.measure_outcome(|| invoke_default(level.instance, member)))
	}

	/// Synthetic members from the level descriptor's extensions.
	///
	/// An extension replaces a member of the same name already emitted at this
	/// level, unless the extension itself produced nothing.
	fn extend(&mut self, depth: usize, declaring: &TypeInfo, descriptor: &dyn Descriptor<C>, level_start: usize) {
		let options = self.options;
		let attributes = MemberAttributes::METHOD | MemberAttributes::EXTENSION;

		if let Some(extension) = descriptor.as_extension() {
			let mut manager = ExtensionManager::new();
			extension.register_extensions(&mut manager);
			for (name, factory) in manager.into_entries() {
				let reading = self.measure_outcome(|| Outcome::Values(factory()));
				if let Some(member) = self.decompose_member(depth, declaring, &name, attributes, Source::Extension, reading) {
					self.place_extension(level_start, member);
				}
			}
		}

		if let Some(extension) = descriptor.as_context_extension() {
			let mut manager = ContextExtensionManager::new();
			extension.register_extensions(&mut manager);
			for (name, factory) in manager.into_entries() {
				let reading = self.measure_outcome(|| Outcome::Values(factory(&options.context)));
				if let Some(member) = self.decompose_member(depth, declaring, &name, attributes, Source::Extension, reading) {
					self.place_extension(level_start, member);
				}
			}
		}
	}

	fn place_extension(&mut self, level_start: usize, member: DecomposedMember<C>) {
		let existing = self.members[level_start..].iter().position(|emitted| emitted.name == member.name);
		match existing {
			Some(_) if member.is_unsupported() => {
				trace!(member = member.name(), "empty extension keeps existing member");
			}
			Some(offset) => {
				trace!(member = member.name(), "extension replaces member");
				self.members.remove(level_start + offset);
				self.members.push(member);
			}
			None => self.members.push(member),
		}
	}

	fn emit(&mut self, depth: usize, declaring: &TypeInfo, name: &str, attributes: MemberAttributes, source: Source, reading: Reading) {
		if let Some(member) = self.decompose_member(depth, declaring, name, attributes, source, reading) {
			self.members.push(member);
		}
	}

	/// Member row for one reading, or `None` when the reading is hidden by the options.
	fn decompose_member(
		&self,
		depth: usize,
		declaring: &TypeInfo,
		name: &str,
		mut attributes: MemberAttributes,
		source: Source,
		reading: Reading,
	) -> Option<DecomposedMember<C>> {
		let value = match reading.outcome {
			Outcome::Values(Variants::Single(Variant { value, description })) => self.decompose_value(value, description),
			Outcome::Values(Variants::Many(items)) => self.decompose_value(Some(object(Variants::Many(items))), None),
			Outcome::Values(Variants::Empty) => {
				if !self.options.include_unsupported {
					trace!(member = name, ?source, "member produced nothing, dropped");
					return None;
				}
				attributes |= MemberAttributes::UNSUPPORTED;
				self.decompose_value(None, None)
			}
			Outcome::Fault(fault) => {
				debug!(member = name, kind = %fault.kind(), message = fault.message(), "member evaluation faulted");
				if !self.options.include_unsupported {
					return None;
				}
				attributes |= MemberAttributes::UNSUPPORTED;
				self.decompose_value(Some(object(fault)), None)
			}
		};

		trace!(member = name, depth, ?source, type_name = value.type_name(), "member decomposed");
		Some(DecomposedMember {
			depth,
			name: name.into(),
			declaring_type_name: declaring.name().into(),
			declaring_type_full_name: declaring.full_name().into(),
			computation_time: reading.elapsed,
			allocated_bytes: reading.allocated,
			attributes,
			value,
		})
	}

	fn decompose_value(&self, value: Option<Object>, description: Option<String>) -> DecomposedValue<C> {
		let descriptor = (self.options.type_resolver)(value.as_ref(), None);
		let identity = descriptor.identity();
		DecomposedValue {
			name: identity.name.clone(),
			type_name: identity.type_name.clone(),
			type_full_name: identity.type_full_name.clone(),
			description: description.or_else(|| identity.description.clone()),
			descriptor: Some(descriptor),
			raw_value: value,
		}
	}

	/// Measure a capability that may decline; readings of a decline are discarded.
	fn measure(&mut self, work: impl FnOnce() -> Option<Variants>) -> Option<Reading> {
		self.diagnoser.start_monitoring();
		let produced = work();
		self.diagnoser.stop_monitoring();
		let elapsed = self.diagnoser.take_elapsed();
		let allocated = self.diagnoser.take_allocated_bytes();
		produced.map(|value| Reading {
			outcome: Outcome::Values(value),
			elapsed,
			allocated,
		})
	}

	fn measure_outcome(&mut self, work: impl FnOnce() -> Outcome) -> Reading {
		self.diagnoser.start_monitoring();
		let outcome = work();
		self.diagnoser.stop_monitoring();
		Reading {
			outcome,
			elapsed: self.diagnoser.take_elapsed(),
			allocated: self.diagnoser.take_allocated_bytes(),
		}
	}
}

fn redirected(substitute: Object) -> Variants {
	Variants::Single(Variant::new(Some(substitute)))
}

/// Invoke the member's accessor, filling defaultable parameters.
///
/// Accessor panics are caught and reported as faults.
fn invoke_default(instance: &dyn Reflect, member: &MemberInfo) -> Outcome {
	let mut args = Vec::with_capacity(member.parameters.len());
	for parameter in &member.parameters {
		match &parameter.default {
			Some(default) => args.push(Some(default.clone())),
			None => {
				return Outcome::Fault(Fault::unsupported(format!(
					"{} requires argument {}: {}",
					member.name, parameter.name, parameter.type_name
				)));
			}
		}
	}

	match panic::catch_unwind(AssertUnwindSafe(|| member.invoke(instance, &args))) {
		Ok(Ok(value)) => Outcome::Values(Variants::Single(Variant::new(value))),
		Ok(Err(fault)) => Outcome::Fault(fault),
		Err(payload) => Outcome::Fault(Fault::panicked(payload)),
	}
}
