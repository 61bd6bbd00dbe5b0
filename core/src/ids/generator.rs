use std::sync::atomic::{AtomicU64, Ordering};
use ulid::Ulid;

/// Source of fresh identifiers for every addressable output object.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// ULID-backed generator that stamps RFC 4122 version/variant bits so every
/// value passes the OSCAL uuid pattern.
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidUuidGenerator;

impl IdGenerator for UlidUuidGenerator {
    fn next_id(&self) -> String {
        uuid_from_ulid(Ulid::new())
    }
}

/// Deterministic generator for tests and reproducible exports.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("00000000-0000-4000-8000-{:012x}", n & 0xffff_ffff_ffff)
    }
}

fn uuid_from_ulid(ulid: Ulid) -> String {
    let mut bits: u128 = ulid.0;
    // version 4 in bits 76..80, variant 0b10 in bits 62..64
    bits = (bits & !(0xf_u128 << 76)) | (0x4_u128 << 76);
    bits = (bits & !(0x3_u128 << 62)) | (0x2_u128 << 62);
    let hex = format!("{:032x}", bits);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
