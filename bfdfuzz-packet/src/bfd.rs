//! BFD Control packet encoding (RFC 5880 Section 4.1)
//!
//! The encoder is deliberately permissive: every field is masked to its wire
//! width and written as-is, the declared `length` is never reconciled with
//! the real size, and the authentication bytes are appended verbatim. The
//! output is always `HEADER_SIZE + auth_data.len()` bytes.

use bytes::{BufMut, BytesMut};

pub const BFD_CONTROL_PORT: u16 = 3784;

/// The only protocol version defined by RFC 5880
pub const BFD_VERSION: u8 = 1;

/// Mandatory section size (six 32-bit words)
pub const HEADER_SIZE: usize = 24;

/// Smallest legal Length when the A bit is set
pub const MIN_PACKET_SIZE_WITH_AUTH: usize = 26;

/// Auth Len of the Keyed/Meticulous SHA1 sections
pub const AUTH_LEN_SHA1: u8 = 28;

/// Initial source port recommended for single-hop sessions (RFC 5881 Section 4)
pub const BFD_SOURCE_PORT_MIN: u16 = 49152;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BfdState {
    AdminDown = 0,
    Down = 1,
    Init = 2,
    Up = 3,
}

impl BfdState {
    pub fn name(self) -> &'static str {
        match self {
            BfdState::AdminDown => "AdminDown",
            BfdState::Down => "Down",
            BfdState::Init => "Init",
            BfdState::Up => "Up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BfdDiagnostic {
    None = 0,
    ControlDetectionTimeExpired = 1,
    EchoFunctionFailed = 2,
    NeighborSignaledSessionDown = 3,
    ForwardingPlaneReset = 4,
    PathDown = 5,
    ConcatenatedPathDown = 6,
    AdministrativelyDown = 7,
    ReverseConcatenatedPathDown = 8,
}

/// Authentication Type (RFC 5880 Section 4.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// Reserved (0)
    Reserved,
    /// Simple Password (1)
    SimplePassword,
    /// Keyed MD5 (2)
    KeyedMd5,
    /// Meticulous Keyed MD5 (3)
    MeticulousKeyedMd5,
    /// Keyed SHA1 (4)
    KeyedSha1,
    /// Meticulous Keyed SHA1 (5)
    MeticulousKeyedSha1,
    /// Any value RFC 5880 leaves undefined
    Custom(u8),
}

impl AuthType {
    pub fn to_u8(self) -> u8 {
        match self {
            AuthType::Reserved => 0,
            AuthType::SimplePassword => 1,
            AuthType::KeyedMd5 => 2,
            AuthType::MeticulousKeyedMd5 => 3,
            AuthType::KeyedSha1 => 4,
            AuthType::MeticulousKeyedSha1 => 5,
            AuthType::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => AuthType::Reserved,
            1 => AuthType::SimplePassword,
            2 => AuthType::KeyedMd5,
            3 => AuthType::MeticulousKeyedMd5,
            4 => AuthType::KeyedSha1,
            5 => AuthType::MeticulousKeyedSha1,
            val => AuthType::Custom(val),
        }
    }
}

/// Authentication section, serialised without any consistency checks.
///
/// `auth_len` is written exactly as given, so it can disagree with the
/// number of bytes that actually follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSection {
    pub auth_type: AuthType,
    pub auth_len: u8,
    pub key_id: u8,
    pub data: Vec<u8>,
}

impl AuthSection {
    pub fn new(auth_type: AuthType, auth_len: u8, key_id: u8) -> Self {
        Self {
            auth_type,
            auth_len,
            key_id,
            data: Vec::new(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(3 + self.data.len());
        buffer.put_u8(self.auth_type.to_u8());
        buffer.put_u8(self.auth_len);
        buffer.put_u8(self.key_id);
        buffer.put_slice(&self.data);
        buffer.to_vec()
    }
}

/// Logical BFD Control packet before encoding.
///
/// Values wider than their wire field are masked on encode; nothing is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfdControlFields {
    pub version: u8,
    pub diagnostic: u8,
    pub state: BfdState,
    pub poll: bool,
    pub final_bit: bool,
    pub control_plane_independent: bool,
    pub auth_present: bool,
    pub demand: bool,
    pub multipoint: bool,
    pub detect_mult: u8,
    /// Declared length; may lie about the real size
    pub length: u8,
    pub my_discriminator: u32,
    pub your_discriminator: u32,
    pub desired_min_tx_interval: u32,
    pub required_min_rx_interval: u32,
    pub required_min_echo_rx_interval: u32,
    /// Appended after the header verbatim
    pub auth_data: Vec<u8>,
}

impl BfdControlFields {
    /// A well-formed Down packet with the given My Discriminator
    pub fn new(my_disc: u32) -> Self {
        Self {
            version: BFD_VERSION,
            diagnostic: BfdDiagnostic::None as u8,
            state: BfdState::Down,
            poll: false,
            final_bit: false,
            control_plane_independent: false,
            auth_present: false,
            demand: false,
            multipoint: false,
            detect_mult: 3,
            length: HEADER_SIZE as u8,
            my_discriminator: my_disc,
            your_discriminator: 0,
            desired_min_tx_interval: 1_000_000, // 1 second in microseconds
            required_min_rx_interval: 1_000_000,
            required_min_echo_rx_interval: 0,
            auth_data: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_state(mut self, state: BfdState) -> Self {
        self.state = state;
        self
    }

    pub fn with_diagnostic(mut self, diag: BfdDiagnostic) -> Self {
        self.diagnostic = diag as u8;
        self
    }

    pub fn with_detect_mult(mut self, detect_mult: u8) -> Self {
        self.detect_mult = detect_mult;
        self
    }

    pub fn with_length(mut self, length: u8) -> Self {
        self.length = length;
        self
    }

    pub fn with_your_discriminator(mut self, your_disc: u32) -> Self {
        self.your_discriminator = your_disc;
        self
    }

    pub fn with_intervals(mut self, tx: u32, rx: u32) -> Self {
        self.desired_min_tx_interval = tx;
        self.required_min_rx_interval = rx;
        self
    }

    pub fn with_echo_interval(mut self, echo_rx: u32) -> Self {
        self.required_min_echo_rx_interval = echo_rx;
        self
    }

    /// Set the A bit and append an auth section (bytes are not checked)
    pub fn with_auth(mut self, auth_data: Vec<u8>) -> Self {
        self.auth_present = true;
        self.auth_data = auth_data;
        self
    }

    /// Set P F C A D M from the low six bits of `flags`, wire order
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.poll = flags & 0x20 != 0;
        self.final_bit = flags & 0x10 != 0;
        self.control_plane_independent = flags & 0x08 != 0;
        self.auth_present = flags & 0x04 != 0;
        self.demand = flags & 0x02 != 0;
        self.multipoint = flags & 0x01 != 0;
        self
    }

    /// Byte 1 without the state bits
    pub fn flags_byte(&self) -> u8 {
        let mut flags = 0u8;
        if self.poll {
            flags |= 0x20;
        }
        if self.final_bit {
            flags |= 0x10;
        }
        if self.control_plane_independent {
            flags |= 0x08;
        }
        if self.auth_present {
            flags |= 0x04;
        }
        if self.demand {
            flags |= 0x02;
        }
        if self.multipoint {
            flags |= 0x01;
        }
        flags
    }

    /// Size of the encoded packet
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.auth_data.len()
    }

    /// Encode to wire bytes. Total: never fails, always `encoded_len()` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(self.encoded_len());

        // Byte 0: Version (3 bits), Diagnostic (5 bits)
        buffer.put_u8(((self.version & 0x07) << 5) | (self.diagnostic & 0x1F));

        // Byte 1: State (2 bits), P F C A D M
        buffer.put_u8((((self.state as u8) & 0x03) << 6) | self.flags_byte());

        buffer.put_u8(self.detect_mult);
        buffer.put_u8(self.length);
        buffer.put_u32(self.my_discriminator);
        buffer.put_u32(self.your_discriminator);
        buffer.put_u32(self.desired_min_tx_interval);
        buffer.put_u32(self.required_min_rx_interval);
        buffer.put_u32(self.required_min_echo_rx_interval);
        buffer.put_slice(&self.auth_data);

        buffer.to_vec()
    }
}

impl Default for BfdControlFields {
    fn default() -> Self {
        Self::new(0x1111_1111)
    }
}

/// Encode a field set; see [`BfdControlFields::encode`]
pub fn encode(fields: &BfdControlFields) -> Vec<u8> {
    fields.encode()
}
