use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised when the engine itself is misused.
///
/// Faults raised by evaluated members are not errors; they are reported as
/// [`Fault`](crate::engine::Fault) values on the affected member.
#[derive(Debug, Error)]
pub enum EngineError {
	/// An entry point that needs an identified object received null.
	#[error("{operation} requires a non-null value")]
	NullValue {
		/// Entry point that rejected the input.
		operation: &'static str,
	},
	/// A type table declared a base the instance could not be viewed as.
	#[error("{type_name} cannot be viewed as its declared base {base_name}")]
	BrokenHierarchy {
		/// Full name of the derived type.
		type_name: String,
		/// Full name of the declared base type.
		base_name: String,
	},
}
