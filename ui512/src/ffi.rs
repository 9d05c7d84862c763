//! C ABI over the default [`Engine`].
//!
//! Every value argument points at 8 contiguous little-endian `u64` words. Pointers
//! need no particular alignment, and all inputs are read before any output is
//! written, so an output may point at the same value as an input.

use std::{cmp::Ordering, ptr};

use crate::{Engine, Words, STATUS_OK, U512};

#[inline(always)]
unsafe fn load(src: *const Words) -> U512 {
    U512::from_words(ptr::read_unaligned(src))
}

#[inline(always)]
unsafe fn store(dst: *mut Words, value: &U512) {
    ptr::write_unaligned(dst, value.into_words());
}

fn ordering_code(ord: Ordering) -> i16 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Sets all 8 words of `dst` to zero.
///
/// ### Safety
///
/// `dst` must be valid for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn zero_u(dst: *mut Words) {
    store(dst, &U512::ZERO);
}

/// Copies `src` into `dst`.
///
/// ### Safety
///
/// `src` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn copy_u(dst: *mut Words, src: *const Words) {
    let value = load(src);
    store(dst, &value);
}

/// Sets `dst` to `value` zero-extended to 512 bits.
///
/// ### Safety
///
/// `dst` must be valid for writes of 64 bytes.
#[export_name = "set_uT64"]
pub unsafe extern "C" fn set_u_t64(dst: *mut Words, value: u64) {
    store(dst, &U512::from_u64(value));
}

/// Three-way comparison of `a` and `b`: -1, 0 or 1.
///
/// ### Safety
///
/// `a` and `b` must be valid for reads of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn compare_u(a: *const Words, b: *const Words) -> i16 {
    ordering_code(load(a).cmp(&load(b)))
}

/// Three-way comparison of `a` against `value` zero-extended: -1, 0 or 1.
///
/// ### Safety
///
/// `a` must be valid for reads of 64 bytes.
#[export_name = "compare_uT64"]
pub unsafe extern "C" fn compare_u_t64(a: *const Words, value: u64) -> i16 {
    ordering_code(load(a).cmp_u64(value))
}

/// `dst = a + b mod 2^512`, returning the carry out (0 or 1).
///
/// ### Safety
///
/// `a` and `b` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn add_u(dst: *mut Words, a: *const Words, b: *const Words) -> i16 {
    let (sum, carry) = load(a).overflowing_add(&load(b));
    store(dst, &sum);
    carry as i16
}

/// `dst = a - b mod 2^512`, returning the borrow out (0 or 1).
///
/// ### Safety
///
/// `a` and `b` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn sub_u(dst: *mut Words, a: *const Words, b: *const Words) -> i16 {
    let (diff, borrow) = load(a).overflowing_sub(&load(b));
    store(dst, &diff);
    borrow as i16
}

/// Full product of `a` and `b`: the low 512 bits go to `lo`, the high 512 bits to `hi`.
///
/// ### Safety
///
/// `a` and `b` must be valid for reads, `lo` and `hi` for writes of 64 bytes, and
/// `lo` and `hi` must not overlap each other.
#[no_mangle]
pub unsafe extern "C" fn mul_u(lo: *mut Words, hi: *mut Words, a: *const Words, b: *const Words) -> i16 {
    let (low, high) = load(a).widening_mul(&load(b));
    store(lo, &low);
    store(hi, &high);
    STATUS_OK
}

/// `dst = a & b`.
///
/// ### Safety
///
/// `a` and `b` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn and_u(dst: *mut Words, a: *const Words, b: *const Words) {
    let value = Engine::default().and(&load(a), &load(b));
    store(dst, &value);
}

/// `dst = a | b`.
///
/// ### Safety
///
/// `a` and `b` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn or_u(dst: *mut Words, a: *const Words, b: *const Words) {
    let value = Engine::default().or(&load(a), &load(b));
    store(dst, &value);
}

/// `dst = a ^ b`.
///
/// ### Safety
///
/// `a` and `b` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn xor_u(dst: *mut Words, a: *const Words, b: *const Words) {
    let value = Engine::default().xor(&load(a), &load(b));
    store(dst, &value);
}

/// `dst = !a`.
///
/// ### Safety
///
/// `a` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn not_u(dst: *mut Words, a: *const Words) {
    let value = Engine::default().not(&load(a));
    store(dst, &value);
}

/// `dst = src << n`; `n >= 512` clears `dst`.
///
/// ### Safety
///
/// `src` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn shl_u(dst: *mut Words, src: *const Words, n: u32) {
    let value = Engine::default().shl(&load(src), n);
    store(dst, &value);
}

/// `dst = src >> n`; `n >= 512` clears `dst`.
///
/// ### Safety
///
/// `src` must be valid for reads and `dst` for writes of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn shr_u(dst: *mut Words, src: *const Words, n: u32) {
    let value = Engine::default().shr(&load(src), n);
    store(dst, &value);
}

/// Bit index of the most significant set bit, or -1 when `a` is zero.
///
/// ### Safety
///
/// `a` must be valid for reads of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn msb_u(a: *const Words) -> i16 {
    load(a).msb().map_or(-1, |bit| bit as i16)
}

/// Bit index of the least significant set bit, or -1 when `a` is zero.
///
/// ### Safety
///
/// `a` must be valid for reads of 64 bytes.
#[no_mangle]
pub unsafe extern "C" fn lsb_u(a: *const Words) -> i16 {
    load(a).lsb().map_or(-1, |bit| bit as i16)
}

/// Divides `dividend` by `divisor`, writing the quotient to `quo` and the remainder to `rem`.
///
/// Returns 0, or -1 for a zero divisor, in which case both outputs are zeroed.
///
/// ### Safety
///
/// `dividend` and `divisor` must be valid for reads, `quo` and `rem` for writes of
/// 64 bytes, and `quo` and `rem` must not overlap each other.
#[no_mangle]
pub unsafe extern "C" fn div_u(
    quo: *mut Words,
    rem: *mut Words,
    dividend: *const Words,
    divisor: *const Words,
) -> i16 {
    match Engine::default().div_rem(&load(dividend), &load(divisor)) {
        Ok((q, r)) => {
            store(quo, &q);
            store(rem, &r);
            STATUS_OK
        }
        Err(err) => {
            store(quo, &U512::ZERO);
            store(rem, &U512::ZERO);
            err.status()
        }
    }
}

/// Divides `dividend` by the single word `divisor`, writing the quotient to `quo`
/// and the remainder to `rem`.
///
/// Returns 0, or -1 for a zero divisor, in which case both outputs are zeroed.
///
/// ### Safety
///
/// `dividend` must be valid for reads and `quo` for writes of 64 bytes, and `rem`
/// must be valid for a `u64` write.
#[export_name = "div_uT64"]
pub unsafe extern "C" fn div_u_t64(
    quo: *mut Words,
    rem: *mut u64,
    dividend: *const Words,
    divisor: u64,
) -> i16 {
    match Engine::default().div_rem_u64(&load(dividend), divisor) {
        Ok((q, r)) => {
            store(quo, &q);
            ptr::write_unaligned(rem, r);
            STATUS_OK
        }
        Err(err) => {
            store(quo, &U512::ZERO);
            ptr::write_unaligned(rem, 0);
            err.status()
        }
    }
}
