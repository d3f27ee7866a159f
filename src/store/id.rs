//! Store-assigned document identifiers
//!
//! 12 bytes, rendered as 24 lowercase hex characters:
//! - 4 bytes: UNIX seconds, big-endian
//! - 5 bytes: random, fixed for the process
//! - 3 bytes: counter, big-endian, wrapping

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;

const COUNTER_MASK: u32 = 0x00ff_ffff;

struct ProcessSeed {
    random: [u8; 5],
    counter: AtomicU32,
}

fn seed() -> &'static ProcessSeed {
    static SEED: OnceLock<ProcessSeed> = OnceLock::new();
    SEED.get_or_init(|| ProcessSeed {
        random: rand::random(),
        counter: AtomicU32::new(rand::random::<u32>() & COUNTER_MASK),
    })
}

/// Identifier assigned to a document when the store accepts it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    /// Generates a new identifier, unique within this process
    pub fn generate() -> Self {
        let seed = seed();
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let count = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&seed.random);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// UNIX seconds at which the identifier was generated
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 || !s.is_ascii() {
            return Err(format!("'{}' is not a 24 character hex id", s));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|e| format!("'{}': {}", s, e))?;
        }
        Ok(Self(bytes))
    }
}
