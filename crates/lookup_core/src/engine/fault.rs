use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

use crate::engine::{Reflect, TypeInfo, evaluated};

/// Category of a member evaluation fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
	/// The accessor returned an error.
	Evaluation,
	/// The member cannot be evaluated without caller input.
	Unsupported,
	/// A descriptor deliberately refused to evaluate the member.
	Disabled,
	/// The accessor panicked.
	Panicked,
}

impl FaultKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Evaluation => "evaluation",
			Self::Unsupported => "unsupported",
			Self::Disabled => "disabled",
			Self::Panicked => "panicked",
		}
	}
}

impl fmt::Display for FaultKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Fault captured while evaluating a member.
///
/// Faults are values: they are reported on the member that raised them and
/// can themselves be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Fault {
	kind: FaultKind,
	message: Box<str>,
}

impl Fault {
	/// Fault with an explicit kind.
	pub fn new(kind: FaultKind, message: impl Into<Box<str>>) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	/// Accessor failure.
	pub fn evaluation(message: impl Into<Box<str>>) -> Self {
		Self::new(FaultKind::Evaluation, message)
	}

	/// Member that default evaluation cannot handle.
	pub fn unsupported(message: impl Into<Box<str>>) -> Self {
		Self::new(FaultKind::Unsupported, message)
	}

	/// Sentinel for members whose evaluation was switched off on purpose.
	pub fn disabled() -> Self {
		Self::new(FaultKind::Disabled, "member execution disabled")
	}

	/// Fault built from a caught panic payload.
	pub fn panicked(payload: Box<dyn Any + Send>) -> Self {
		let message = if let Some(text) = payload.downcast_ref::<&str>() {
			(*text).to_owned()
		} else if let Some(text) = payload.downcast_ref::<String>() {
			text.clone()
		} else {
			"accessor panicked".to_owned()
		};
		Self::new(FaultKind::Panicked, message)
	}

	/// Fault category.
	pub fn kind(&self) -> FaultKind {
		self.kind
	}

	/// Human-readable message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

impl Reflect for Fault {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<Fault>("Fault")
				.property("kind", |fault: &Fault| evaluated(fault.kind.as_str().to_owned()))
				.property("message", |fault: &Fault| evaluated(fault.message.to_string()))
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

	fn as_fault(&self) -> Option<&Fault> {
		Some(self)
	}
}
