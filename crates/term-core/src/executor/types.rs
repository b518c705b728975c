//! Executor mode, protocol errors, and the reply-bytes wrapper.

use std::panic::Location;

/// Strict mode exits on any protocol error (`--exit-on-unknown`); lenient
/// mode (the default) logs and leaves the offending command's intended
/// mutation un-applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutorMode {
    #[default]
    Lenient,
    Strict,
}

/// A protocol error: an unrecognized CSI final byte, an unhandled private
/// mode family, or a malformed UTF-8 lead byte. Carries the call site so
/// strict-mode logging can report it, per §7.
#[derive(Debug, thiserror::Error)]
#[error("{message} ({location})")]
pub struct ProtocolError {
    pub message: String,
    pub location: &'static Location<'static>,
}

impl ProtocolError {
    #[track_caller]
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), location: Location::caller() }
    }
}

/// Bytes the Executor wants written back to the PTY master (DA/DSR replies).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply(pub Vec<u8>);

impl Reply {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<String> for Reply {
    fn from(s: String) -> Self {
        Reply(s.into_bytes())
    }
}

impl From<&str> for Reply {
    fn from(s: &str) -> Self {
        Reply(s.as_bytes().to_vec())
    }
}

/// Parsed CSI parameter list: `;`-separated decimal integers, with the two
/// default conventions ECMA-48 commands actually use.
pub(crate) struct Params(Vec<i64>);

impl Params {
    pub(crate) fn parse(payload: &str) -> Self {
        if payload.is_empty() {
            return Params(Vec::new());
        }
        Params(payload.split(';').map(|s| s.parse::<i64>().unwrap_or(0)).collect())
    }

    /// Raw value at `idx`, or `default` if the parameter is absent.
    /// Used where an empty param and an explicit `0` mean different things
    /// (erase modes, DEC private codes).
    pub(crate) fn raw(&self, idx: usize, default: i64) -> i64 {
        self.0.get(idx).copied().unwrap_or(default)
    }

    /// "Count" value at `idx`: absent *or* `0` both collapse to `1`, the
    /// convention cursor-movement and insert/delete counts use.
    pub(crate) fn count(&self, idx: usize) -> i64 {
        match self.0.get(idx) {
            Some(0) | None => 1,
            Some(&v) => v,
        }
    }

    pub(crate) fn get(&self, idx: usize) -> Option<i64> {
        self.0.get(idx).copied()
    }

    pub(crate) fn all(&self) -> &[i64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_has_no_params() {
        let p = Params::parse("");
        assert_eq!(p.get(0), None);
        assert_eq!(p.count(0), 1);
        assert_eq!(p.raw(0, 0), 0);
    }

    #[test]
    fn count_collapses_zero_to_one() {
        let p = Params::parse("0;5");
        assert_eq!(p.count(0), 1);
        assert_eq!(p.count(1), 5);
    }

    #[test]
    fn raw_keeps_explicit_zero() {
        let p = Params::parse("0");
        assert_eq!(p.raw(0, 9), 0);
    }

    #[test]
    fn multi_param_split() {
        let p = Params::parse("5;7");
        assert_eq!(p.all(), &[5, 7]);
    }
}
