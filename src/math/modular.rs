use num_traits::{Euclid, Zero};

/// Floor modulus: the remainder always takes the sign of the (positive) modulus
///
/// `floor_mod(-1, 4) == 3`, `floor_mod(4, 4) == 0`. A zero modulus yields zero
/// rather than trapping, so callers with a constant slot count never branch.
pub fn floor_mod<T>(value: T, modulus: T) -> T
where
    T: Euclid + Zero + Copy,
{
    if modulus.is_zero() {
        T::zero()
    } else {
        value.rem_euclid(&modulus)
    }
}

/// Floor modulus producing an index into a fixed-size ring of `len` entries
pub fn ring_index(value: i64, len: usize) -> usize {
    floor_mod(value, len as i64) as usize
}
