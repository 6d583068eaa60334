//! Bit-field extraction helpers for A64 instruction words.

/// Extract bits `[hi:lo]` (inclusive).
#[inline]
#[must_use]
pub const fn bits(raw: u32, hi: u32, lo: u32) -> u32 {
    (raw >> lo) & ((1 << (hi - lo + 1)) - 1)
}

/// Extract a single bit.
#[inline]
#[must_use]
pub const fn bit(raw: u32, pos: u32) -> bool {
    (raw >> pos) & 1 != 0
}

/// Sign-extend the low `width` bits of `value`.
#[inline]
#[must_use]
pub const fn sign_extend(value: u32, width: u32) -> i64 {
    let shift = 64 - width;
    ((value as i64) << shift) >> shift
}

/// Extract Rd / Rt (bits [4:0]).
#[inline]
#[must_use]
pub const fn decode_rd(raw: u32) -> u8 {
    (raw & 0x1F) as u8
}

/// Extract Rn (bits [9:5]).
#[inline]
#[must_use]
pub const fn decode_rn(raw: u32) -> u8 {
    ((raw >> 5) & 0x1F) as u8
}

/// Extract Rm (bits [20:16]).
#[inline]
#[must_use]
pub const fn decode_rm(raw: u32) -> u8 {
    ((raw >> 16) & 0x1F) as u8
}

/// Extract the 16-bit immediate of exception-generating and move-wide
/// instructions (bits [20:5]).
#[inline]
#[must_use]
pub const fn decode_imm16(raw: u32) -> u16 {
    ((raw >> 5) & 0xFFFF) as u16
}

/// Extract the `sf` size bit (bit 31): true for 64-bit operation.
#[inline]
#[must_use]
pub const fn decode_sf(raw: u32) -> bool {
    bit(raw, 31)
}
