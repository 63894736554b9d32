// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG for sampling quiz
/// cards. Callers seed it (from the clock in production, from a constant in
/// tests).
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a uniformly distributed number in `[0, max)`.
    ///
    /// Draws that fall in the final partial bucket of the `u32` range are
    /// rejected, so there is no modulo bias. Returns 0 when `max` is 0.
    pub fn generate(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let zone = u32::MAX - (u32::MAX % max);
        loop {
            let x = self.next_u32();
            if x < zone {
                return x % max;
            }
        }
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    let len = v.len();
    for i in (1..len).rev() {
        let j = rng.generate(i as u32 + 1) as usize;
        v.swap(i, j);
    }
    v
}

/// Draw up to `limit` elements uniformly without replacement.
///
/// Runs only the first `limit` steps of a forward Fisher-Yates pass, so
/// every subset and every ordering of it is equally likely.
pub fn sample<T>(v: Vec<T>, limit: usize, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    let len = v.len();
    let take = limit.min(len);
    for i in 0..take {
        let j = i + rng.generate((len - i) as u32) as usize;
        v.swap(i, j);
    }
    v.truncate(take);
    v
}
