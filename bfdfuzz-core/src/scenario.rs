//! Scenario descriptors and the state shared while generating them

/// Scenario identifier (position in the catalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenarioId(pub u8);

/// Discriminator used by the liveness probe. Never handed out to scenarios.
pub const PROBE_DISCRIMINATOR: u32 = 0xDEAD_DEAD;

/// Seed used for randomized scenarios unless overridden
pub const DEFAULT_SEED: u64 = 42;

/// One datagram payload produced by a scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzPacket {
    /// Exact UDP payload to transmit
    pub bytes: Vec<u8>,
    /// Short human-readable label for reports
    pub label: String,
    /// IP TTL override; `None` means the single-hop default of 255
    pub ttl: Option<u8>,
}

impl FuzzPacket {
    /// Create a packet sent with the default TTL
    pub fn new<S: Into<String>>(bytes: Vec<u8>, label: S) -> Self {
        Self {
            bytes,
            label: label.into(),
            ttl: None,
        }
    }

    /// Send this packet with a specific IP TTL
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Scenario generator function
pub type GenerateFn = fn(&mut ScenarioContext) -> Vec<FuzzPacket>;

/// Scenario descriptor (metadata plus the generator)
#[derive(Debug, Clone, Copy)]
pub struct ScenarioDescriptor {
    /// Scenario ID
    pub id: ScenarioId,
    /// Unique short name
    pub name: &'static str,
    /// The validation rule the variants violate
    pub rfc_rule: &'static str,
    /// What the scenario sends
    pub description: &'static str,
    /// Generator producing the ordered variants
    pub generate: GenerateFn,
}

impl ScenarioDescriptor {
    /// Run the generator against a context
    pub fn packets(&self, ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
        (self.generate)(ctx)
    }
}

/// Hands out non-zero, monotonically increasing My Discriminator values so
/// scenarios never collide on session state inside the target.
#[derive(Debug, Clone)]
pub struct DiscriminatorAllocator {
    next: u32,
}

impl DiscriminatorAllocator {
    /// First value handed out
    pub const FIRST: u32 = 0xF0F0_0001;

    pub fn new() -> Self {
        Self::starting_at(Self::FIRST)
    }

    pub fn starting_at(first: u32) -> Self {
        let mut allocator = Self { next: first };
        allocator.skip_reserved();
        allocator
    }

    /// Take the next discriminator
    pub fn allocate(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        self.skip_reserved();
        value
    }

    /// Reserve `count` consecutive discriminators and return the first.
    ///
    /// The block never contains zero or the probe discriminator. A block
    /// that would straddle the probe value starts just past it, and one that
    /// would run off the end of the space starts again at 1. `count` must be
    /// below the probe discriminator.
    pub fn reserve(&mut self, count: u32) -> u32 {
        debug_assert!(count < PROBE_DISCRIMINATOR);

        loop {
            let base = self.next;
            match base.checked_add(count) {
                None => self.next = 1,
                Some(end) if (base..end).contains(&PROBE_DISCRIMINATOR) => {
                    self.next = PROBE_DISCRIMINATOR + 1;
                }
                Some(end) => {
                    self.next = end;
                    self.skip_reserved();
                    return base;
                }
            }
        }
    }

    /// Peek at the value the next call to `allocate` returns
    pub fn peek(&self) -> u32 {
        self.next
    }

    fn skip_reserved(&mut self) {
        while self.next == 0 || self.next == PROBE_DISCRIMINATOR {
            self.next = self.next.wrapping_add(1);
        }
    }
}

impl Default for DiscriminatorAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state threaded through the catalog during one run
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    /// Discriminator counter
    pub discriminators: DiscriminatorAllocator,
    /// Seed for randomized payloads
    pub seed: u64,
}

impl ScenarioContext {
    pub fn new(seed: u64) -> Self {
        Self {
            discriminators: DiscriminatorAllocator::new(),
            seed,
        }
    }

    /// Shorthand for `self.discriminators.allocate()`
    pub fn next_discriminator(&mut self) -> u32 {
        self.discriminators.allocate()
    }
}

impl Default for ScenarioContext {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
