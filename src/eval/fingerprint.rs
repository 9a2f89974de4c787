use crate::eval::gate::GateState;
use crate::eval::snapshot::Snapshot;
use crate::foundation::core::Value;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x3c6e_f372_fe94_f82b;

/// Stable 128-bit snapshot digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hashes which nodes resolved, to what, and every reached gate.
///
/// Eval counters and the pass clock are left out, so a still scene hashes the same at
/// every frame.
pub(crate) fn fingerprint_snapshot(s: &Snapshot) -> Fingerprint {
    let mut h = StableHasher::new();
    h.write_u32(s.values.len() as u32);
    for v in &s.values {
        match v {
            Some(v) => {
                h.write_u8(1);
                write_value(&mut h, v);
            }
            None => h.write_u8(0),
        }
    }
    for g in &s.gates {
        match g {
            Some(g) => {
                h.write_u8(match g.state {
                    GateState::Before => 1,
                    GateState::Active => 2,
                    GateState::After => 3,
                });
                h.write_bool(g.is_included());
            }
            None => h.write_u8(0),
        }
    }
    h.finish()
}

fn write_value(h: &mut StableHasher, v: &Value) {
    h.write_u8(match v {
        Value::Float(_) => 0,
        Value::Vec2(_) => 1,
        Value::Vec3(_) => 2,
        Value::Vec4(_) => 3,
        Value::Color(_) => 4,
        Value::Quat(_) => 5,
    });
    for c in v.components() {
        h.write_f64(*c);
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    fn finish(self) -> Fingerprint {
        let v = self.inner.digest128();
        Fingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}
