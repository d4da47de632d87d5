use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use crate::engine::AllocationCounter;

thread_local! {
	static ALLOCATED: Cell<u64> = const { Cell::new(0) };
}

/// Global allocator wrapper that counts bytes allocated per thread.
///
/// Opt in from a binary or test crate:
///
/// ```ignore
/// #[global_allocator]
/// static GLOBAL: lookup::engine::CountingAllocator = lookup::engine::CountingAllocator;
/// ```
///
/// then pass [`ThreadAllocations`] to the diagnoser.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingAllocator;

// SAFETY: every method forwards to `System` with the caller's layout and
// pointer unchanged, so `System` upholds the `GlobalAlloc` contract. `record`
// only touches a const-initialized thread-local `Cell` and never allocates.
unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		record(layout.size());
		unsafe { System.alloc(layout) }
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		record(layout.size());
		unsafe { System.alloc_zeroed(layout) }
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) }
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		record(new_size.saturating_sub(layout.size()));
		unsafe { System.realloc(ptr, layout, new_size) }
	}
}

fn record(bytes: usize) {
	// try_with: the slot is gone during thread teardown.
	let _ = ALLOCATED.try_with(|total| total.set(total.get().wrapping_add(bytes as u64)));
}

/// Cumulative bytes allocated by the current thread through [`CountingAllocator`].
pub fn thread_allocated_bytes() -> u64 {
	ALLOCATED.try_with(Cell::get).unwrap_or(0)
}

/// Allocation counter backed by [`CountingAllocator`].
///
/// Reads zero unless `CountingAllocator` is the global allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadAllocations;

impl AllocationCounter for ThreadAllocations {
	fn thread_allocated_bytes(&self) -> u64 {
		thread_allocated_bytes()
	}
}
