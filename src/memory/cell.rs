use std::fmt::{Debug, Display};

/// An unsigned integer usable as a tape cell.
///
/// Arithmetic wraps at the cell width. Counts wider than the cell are reduced
/// modulo `2^BITS` first, which gives the same result as applying `+` that
/// many times.
pub trait Cell: Copy + Default + PartialEq + Debug + Display + Send + 'static {
	const BITS: u32;

	fn increased(self, n: u32) -> Self;

	fn decreased(self, n: u32) -> Self;

	/// Zero-extend one input byte
	fn from_byte(byte: u8) -> Self;

	/// Truncate to the byte written on output
	fn low_byte(self) -> u8;

	fn is_zero(self) -> bool { self == Self::default() }
}

macro_rules! impl_cell {
	($($t:ty),*) => {$(
		impl Cell for $t {
			const BITS: u32 = <$t>::BITS;

			fn increased(self, n: u32) -> Self { self.wrapping_add(n as $t) }

			fn decreased(self, n: u32) -> Self { self.wrapping_sub(n as $t) }

			fn from_byte(byte: u8) -> Self { <$t>::from(byte) }

			fn low_byte(self) -> u8 { self as u8 }
		}
	)*};
}

impl_cell!(u8, u16, u32);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wraps_at_width() {
		assert_eq!(255u8.increased(1), 0);
		assert_eq!(0u8.decreased(1), 255);
		assert_eq!(0u8.increased(256 + 3), 3);
		assert_eq!(65535u16.increased(2), 1);
		assert_eq!(0u32.decreased(1), u32::MAX);
		assert_eq!(250u16.increased(10), 260);
	}

	#[test]
	fn byte_conversions() {
		assert_eq!(u32::from_byte(200), 200);
		assert_eq!(0x1_41u16.low_byte(), 0x41);
		assert!(0u16.is_zero());
		assert!(!1u32.is_zero());
	}
}
