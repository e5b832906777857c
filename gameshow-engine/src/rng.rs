//! Seedable randomness for the wheel.
//!
//! One user seed fans out into independent streams via HMAC-SHA256 domain
//! separation: `outcome` feeds every draw that can change a winner (spin
//! parameters, shuffles) and `styling` feeds cosmetic color rolls. Rerolling
//! colors therefore never disturbs the outcome sequence, and a seeded wheel
//! replays the same winners no matter how often the table is restyled.
//!
//! The outcome stream runs on ChaCha20 so replays stay stable across
//! platforms and releases; styling uses the cheaper SmallRng since nothing
//! observable beyond a color depends on it.

use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

const OUTCOME_TAG: &[u8] = b"outcome";
const STYLING_TAG: &[u8] = b"styling";

#[derive(Debug, Clone)]
pub struct WheelRng {
    outcome: ChaCha20Rng,
    styling: SmallRng,
}

impl WheelRng {
    /// Build both streams from a single user-facing seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            outcome: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, OUTCOME_TAG)),
            styling: SmallRng::seed_from_u64(derive_stream_seed(seed, STYLING_TAG)),
        }
    }

    /// Build from operating-system entropy, for hosts that do not care
    /// about replay.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_user_seed(rand::random::<u64>())
    }

    /// Stream backing draws that decide winners.
    pub fn outcome(&mut self) -> &mut ChaCha20Rng {
        &mut self.outcome
    }

    /// Stream backing cosmetic draws.
    pub fn styling(&mut self) -> &mut SmallRng {
        &mut self.styling
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
