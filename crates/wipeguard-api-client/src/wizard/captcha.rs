//! Human-verification gate shown before file selection.

use rand::Rng;
use std::time::{Duration, Instant};

pub const CAPTCHA_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNPQRSTUVWXYZ23456789";
pub const CAPTCHA_LENGTH: usize = 6;
pub const MAX_CAPTCHA_ATTEMPTS: u32 = 3;
pub const CAPTCHA_LOCKOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaOutcome {
    Passed,
    Mismatch { remaining_attempts: u32 },
    Locked { retry_after: Duration },
}

/// A six-character code the user has to type back.
///
/// Every mismatch regenerates the code. The third consecutive mismatch locks the gate for
/// [`CAPTCHA_LOCKOUT`]; once the lock expires the attempt counter starts over.
#[derive(Debug, Clone)]
pub struct CaptchaGate {
    code: String,
    failed_attempts: u32,
    locked_until: Option<Instant>,
}

impl Default for CaptchaGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptchaGate {
    pub fn new() -> Self {
        Self {
            code: generate_code(),
            failed_attempts: 0,
            locked_until: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn regenerate(&mut self) {
        self.code = generate_code();
    }

    pub fn verify(&mut self, input: &str) -> CaptchaOutcome {
        self.verify_at(input, Instant::now())
    }

    pub fn verify_at(&mut self, input: &str, now: Instant) -> CaptchaOutcome {
        if let Some(until) = self.locked_until {
            if now < until {
                return CaptchaOutcome::Locked {
                    retry_after: until - now,
                };
            }
            self.locked_until = None;
            self.failed_attempts = 0;
        }

        if input.trim().to_uppercase() == self.code {
            self.failed_attempts = 0;
            return CaptchaOutcome::Passed;
        }

        self.failed_attempts += 1;
        self.regenerate();

        if self.failed_attempts >= MAX_CAPTCHA_ATTEMPTS {
            self.locked_until = Some(now + CAPTCHA_LOCKOUT);
            return CaptchaOutcome::Locked {
                retry_after: CAPTCHA_LOCKOUT,
            };
        }

        CaptchaOutcome::Mismatch {
            remaining_attempts: MAX_CAPTCHA_ATTEMPTS - self.failed_attempts,
        }
    }
}

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CAPTCHA_LENGTH)
        .map(|_| CAPTCHA_ALPHABET[rng.random_range(0..CAPTCHA_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // '0' is not in the alphabet, so this never matches.
    const WRONG: &str = "000000";

    #[test]
    fn codes_use_the_alphabet() {
        let gate = CaptchaGate::new();
        assert_eq!(gate.code().len(), CAPTCHA_LENGTH);
        assert!(gate.code().bytes().all(|b| CAPTCHA_ALPHABET.contains(&b)));
    }

    #[test]
    fn accepts_lowercase_input() {
        let mut gate = CaptchaGate::new();
        let input = gate.code().to_lowercase();
        assert_eq!(gate.verify(&input), CaptchaOutcome::Passed);
    }

    #[test]
    fn mismatch_regenerates_code() {
        let mut gate = CaptchaGate::new();
        let before = gate.code().to_string();
        let mut changed = false;
        // A fresh code can collide with the old one; a few tries rule that out.
        for _ in 0..2 {
            let outcome = gate.verify(WRONG);
            assert!(matches!(outcome, CaptchaOutcome::Mismatch { .. }));
            changed |= gate.code() != before;
        }
        assert!(changed);
    }

    #[test]
    fn third_failure_locks_then_expires() {
        let mut gate = CaptchaGate::new();
        let start = Instant::now();

        assert_eq!(
            gate.verify_at(WRONG, start),
            CaptchaOutcome::Mismatch {
                remaining_attempts: 2
            }
        );
        assert_eq!(
            gate.verify_at(WRONG, start),
            CaptchaOutcome::Mismatch {
                remaining_attempts: 1
            }
        );
        assert_eq!(
            gate.verify_at(WRONG, start),
            CaptchaOutcome::Locked {
                retry_after: CAPTCHA_LOCKOUT
            }
        );

        // Even the right code is refused while locked.
        let code = gate.code().to_string();
        let during = start + Duration::from_secs(1);
        assert_eq!(
            gate.verify_at(&code, during),
            CaptchaOutcome::Locked {
                retry_after: Duration::from_secs(2)
            }
        );

        let after = start + CAPTCHA_LOCKOUT + Duration::from_millis(1);
        assert_eq!(gate.verify_at(&code, after), CaptchaOutcome::Passed);
    }
}
