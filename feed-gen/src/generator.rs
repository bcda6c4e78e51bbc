//! Deadline-bounded generator of synthetic put operations.
//!
//! Every record has the shape
//! ```text
//! {"put": "id:test:test::<8 x a-z>", "fields": {"test": "<payload_size x a-z>"}}\n
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Read};
use std::time::{Duration, Instant};

/// Length of the random user-specific part of generated ids.
const ID_LENGTH: usize = 8;

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Length of the random `test` field value
    pub payload_size: usize,
    /// No record is started at or after this instant
    pub deadline: Instant,
}

impl GeneratorConfig {
    pub fn new(payload_size: usize, deadline: Instant) -> Self {
        Self {
            payload_size,
            deadline,
        }
    }

    /// Generate for `duration` starting now.
    pub fn for_duration(payload_size: usize, duration: Duration) -> Self {
        Self::new(payload_size, Instant::now() + duration)
    }
}

/// Pull-based source of synthetic feed records.
///
/// The deadline is checked once per record, before it is synthesized; a
/// record that has been started is always delivered in full.
pub struct Generator<G = StdRng> {
    config: GeneratorConfig,
    rng: G,
    clock: Box<dyn FnMut() -> Instant + Send>,
    buf: Vec<u8>,
    pos: usize,
    records: u64,
    expired: bool,
}

impl Generator<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn new(payload_size: usize, deadline: Instant) -> Self {
        Self::with_rng(payload_size, deadline, StdRng::from_os_rng())
    }
}

impl<G: Rng> Generator<G> {
    pub fn with_rng(payload_size: usize, deadline: Instant, rng: G) -> Self {
        Self::from_config(GeneratorConfig::new(payload_size, deadline), rng)
    }

    pub fn from_config(config: GeneratorConfig, rng: G) -> Self {
        Self {
            buf: Vec::with_capacity(config.payload_size + 64),
            config,
            rng,
            clock: Box::new(Instant::now),
            pos: 0,
            records: 0,
            expired: false,
        }
    }

    /// Replace the time source used for deadline checks.
    pub fn with_clock(mut self, clock: impl FnMut() -> Instant + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Records started so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn synthesize(&mut self) {
        self.buf.clear();
        self.pos = 0;
        self.buf.extend_from_slice(b"{\"put\": \"id:test:test::");
        push_random(&mut self.rng, &mut self.buf, ID_LENGTH);
        self.buf.extend_from_slice(b"\", \"fields\": {\"test\": \"");
        push_random(&mut self.rng, &mut self.buf, self.config.payload_size);
        self.buf.extend_from_slice(b"\"}}\n");
        self.records += 1;
    }
}

fn push_random<G: Rng>(rng: &mut G, buf: &mut Vec<u8>, len: usize) {
    buf.extend((0..len).map(|_| rng.random_range(b'a'..=b'z')));
}

impl<G: Rng> Read for Generator<G> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if self.pos == self.buf.len() {
            if self.expired {
                return Ok(0);
            }
            if (self.clock)() >= self.config.deadline {
                self.expired = true;
                log::debug!("Generator deadline reached after {} records", self.records);
                return Ok(0);
            }
            self.synthesize();
        }

        let pending = &self.buf[self.pos..];
        let n = pending.len().min(out.len());
        out[..n].copy_from_slice(&pending[..n]);
        self.pos += n;
        Ok(n)
    }
}
