use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

/// Cooperative cancellation shared between a run and whoever wants to stop
/// it. Clones share the same flag.
#[derive(Debug, Default)]
pub struct CancelFlag {
	inner: Arc<AtomicBool>,
}

impl Clone for CancelFlag {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl CancelFlag {
	pub fn new() -> Self { Self::default() }

	/// Ask the run to stop before its next instruction.
	pub fn cancel(&self) { self.inner.store(true, Ordering::Relaxed) }

	pub fn is_cancelled(&self) -> bool { self.inner.load(Ordering::Relaxed) }

	/// Clear the flag so the owner can start another run with it.
	pub fn reset(&self) { self.inner.store(false, Ordering::Relaxed) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clones_share_state() {
		let flag = CancelFlag::new();
		let other = flag.clone();
		assert!(!flag.is_cancelled());
		other.cancel();
		assert!(flag.is_cancelled());
		flag.reset();
		assert!(!other.is_cancelled());
	}

	#[test]
	fn cancel_from_another_thread() {
		let flag = CancelFlag::new();
		let remote = flag.clone();
		std::thread::spawn(move || remote.cancel()).join().unwrap();
		assert!(flag.is_cancelled());
	}
}
