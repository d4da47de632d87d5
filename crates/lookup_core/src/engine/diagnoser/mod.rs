use std::sync::Arc;
use std::time::{Duration, Instant};

/// Measures one member evaluation at a time.
///
/// A diagnoser is reused sequentially across the members of one
/// decomposition call; each `take_*` read resets the recorded value.
pub trait Diagnoser {
	/// Record the starting point.
	fn start_monitoring(&mut self);

	/// Record the end point.
	fn stop_monitoring(&mut self);

	/// Elapsed time between the last start/stop pair.
	fn take_elapsed(&mut self) -> Duration;

	/// Bytes allocated by the calling thread between the last start/stop pair.
	fn take_allocated_bytes(&mut self) -> u64;
}

/// Source of the calling thread's cumulative allocated-byte count.
pub trait AllocationCounter: Send + Sync {
	/// Bytes allocated by the current thread so far.
	fn thread_allocated_bytes(&self) -> u64;
}

/// Counter for runtimes without allocation tracking; always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAllocations;

impl AllocationCounter for NoAllocations {
	fn thread_allocated_bytes(&self) -> u64 {
		0
	}
}

/// Builds the diagnoser for one decomposition call.
pub type DiagnoserFactory = Arc<dyn Fn() -> Box<dyn Diagnoser> + Send + Sync>;

/// Factory producing [`ClockDiagnoser`] instances reading `counter`.
pub fn clock_diagnoser(counter: Arc<dyn AllocationCounter>) -> DiagnoserFactory {
	Arc::new(move || -> Box<dyn Diagnoser> { Box::new(ClockDiagnoser::new(counter.clone())) })
}

/// Factory producing [`NoopDiagnoser`] instances.
pub fn noop_diagnoser() -> DiagnoserFactory {
	Arc::new(|| -> Box<dyn Diagnoser> { Box::new(NoopDiagnoser) })
}

/// Wall-clock timer with pluggable allocation accounting.
pub struct ClockDiagnoser {
	counter: Arc<dyn AllocationCounter>,
	started: Option<Instant>,
	start_bytes: u64,
	elapsed: Duration,
	allocated: u64,
}

impl ClockDiagnoser {
	/// Diagnoser reading allocations from `counter`.
	pub fn new(counter: Arc<dyn AllocationCounter>) -> Self {
		Self {
			counter,
			started: None,
			start_bytes: 0,
			elapsed: Duration::ZERO,
			allocated: 0,
		}
	}
}

impl Default for ClockDiagnoser {
	fn default() -> Self {
		Self::new(Arc::new(NoAllocations))
	}
}

impl Diagnoser for ClockDiagnoser {
	fn start_monitoring(&mut self) {
		self.start_bytes = self.counter.thread_allocated_bytes();
		self.started = Some(Instant::now());
	}

	fn stop_monitoring(&mut self) {
		let Some(started) = self.started.take() else {
			return;
		};
		self.elapsed = started.elapsed();
		self.allocated = self.counter.thread_allocated_bytes().saturating_sub(self.start_bytes);
	}

	fn take_elapsed(&mut self) -> Duration {
		std::mem::take(&mut self.elapsed)
	}

	fn take_allocated_bytes(&mut self) -> u64 {
		std::mem::take(&mut self.allocated)
	}
}

/// Diagnoser that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnoser;

impl Diagnoser for NoopDiagnoser {
	fn start_monitoring(&mut self) {}

	fn stop_monitoring(&mut self) {}

	fn take_elapsed(&mut self) -> Duration {
		Duration::ZERO
	}

	fn take_allocated_bytes(&mut self) -> u64 {
		0
	}
}
