//! Level and lives tracking, plus the resume password
//!
//! A password is six ASCII characters: the tag `cx` followed by two base-25
//! digit pairs (level, then lives), each digit offset from `'a'`. It is an
//! obfuscation, not a secret.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{PROGRESS_CAP, STARTING_LEVEL, STARTING_LIVES};

/// Structural prefix of every valid password
pub const PASSWORD_TAG: &str = "cx";
/// Total password length in characters
pub const PASSWORD_LEN: usize = 6;
const RADIX: u32 = 25;

/// Why a password was rejected
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasswordError {
    WrongLength { actual: usize },
    BadTag { found: String },
    BadDigit { index: usize, found: char },
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { actual } => {
                write!(f, "password must be {PASSWORD_LEN} characters, got {actual}")
            }
            Self::BadTag { found } => {
                write!(f, "password must start with \"{PASSWORD_TAG}\", got \"{found}\"")
            }
            Self::BadDigit { index, found } => {
                write!(f, "invalid password digit {found:?} at position {index}")
            }
        }
    }
}

impl std::error::Error for PasswordError {}

/// Per-level asteroid allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quota {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl Quota {
    pub fn for_level(level: u32) -> Self {
        Self {
            small: level % 3,
            medium: (level % 9) / 3,
            large: level / 9,
        }
    }
}

/// Current level and remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub lives: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: STARTING_LEVEL,
            lives: STARTING_LIVES,
        }
    }
}

impl Progress {
    pub fn new(level: u32, lives: u32) -> Self {
        Self {
            level: level.min(PROGRESS_CAP),
            lives: lives.min(PROGRESS_CAP),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Saturates at the cap
    pub fn add_level(&mut self) {
        if self.level < PROGRESS_CAP {
            self.level += 1;
        }
    }

    /// Saturates at the cap
    pub fn add_life(&mut self) {
        if self.lives < PROGRESS_CAP {
            self.lives += 1;
        }
    }

    /// Lose a life; returns whether any remain
    pub fn take_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }

    pub fn quota(&self) -> Quota {
        Quota::for_level(self.level)
    }

    pub fn password(&self) -> String {
        encode_password(self.level, self.lives)
    }

    /// Replace level and lives from a password. Untouched on error.
    pub fn apply_password(&mut self, password: &str) -> Result<(), PasswordError> {
        *self = decode_password(password)?;
        Ok(())
    }
}

/// Encode `(level, lives)`; both must be within the cap
pub fn encode_password(level: u32, lives: u32) -> String {
    debug_assert!(level <= PROGRESS_CAP && lives <= PROGRESS_CAP);
    let mut password = String::with_capacity(PASSWORD_LEN);
    password.push_str(PASSWORD_TAG);
    for value in [level.min(PROGRESS_CAP), lives.min(PROGRESS_CAP)] {
        password.push(digit_char(value / RADIX));
        password.push(digit_char(value % RADIX));
    }
    password
}

/// Decode a password back into progress, validating its structure
pub fn decode_password(password: &str) -> Result<Progress, PasswordError> {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() != PASSWORD_LEN {
        return Err(PasswordError::WrongLength {
            actual: chars.len(),
        });
    }
    let tag: String = chars[..2].iter().collect();
    if tag != PASSWORD_TAG {
        return Err(PasswordError::BadTag { found: tag });
    }

    let level = decode_pair(&chars, 2)?;
    let lives = decode_pair(&chars, 4)?;
    Ok(Progress { level, lives })
}

fn digit_char(digit: u32) -> char {
    // digit <= 26, so the result stays within 'a'..='{'
    char::from(b'a' + digit as u8)
}

fn digit_value(chars: &[char], index: usize) -> Result<u32, PasswordError> {
    let found = chars[index];
    (found as u32)
        .checked_sub('a' as u32)
        .ok_or(PasswordError::BadDigit { index, found })
}

fn decode_pair(chars: &[char], start: usize) -> Result<u32, PasswordError> {
    let high = digit_value(chars, start)?;
    let low = digit_value(chars, start + 1)?;
    // Cannot overflow: chars top out at 0x10FFFF
    let value = high * RADIX + low;
    if value > PROGRESS_CAP {
        let index = if high * RADIX > PROGRESS_CAP { start } else { start + 1 };
        return Err(PasswordError::BadDigit {
            index,
            found: chars[index],
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_level_one_three_lives() {
        let progress = Progress::default();
        assert_eq!(progress.level, 1);
        assert_eq!(progress.lives, 3);
        assert_eq!(progress.password(), "cxabad");
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_password(0, 0), "cxaaaa");
        assert_eq!(encode_password(26, 51), "cxbbcb");
        assert_eq!(encode_password(650, 650), "cx{a{a");
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            decode_password("cxabc"),
            Err(PasswordError::WrongLength { actual: 5 })
        );
        assert_eq!(
            decode_password(""),
            Err(PasswordError::WrongLength { actual: 0 })
        );
        assert!(decode_password("cxabadd").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_tag() {
        assert_eq!(
            decode_password("xcabad"),
            Err(PasswordError::BadTag {
                found: "xc".to_string()
            })
        );
    }

    #[test]
    fn test_decode_accepts_digits_past_the_radix() {
        // 'z' is 25 in the low place: 0 * 25 + 25
        assert_eq!(decode_password("cxazad"), Ok(Progress::new(25, 3)));
        assert_eq!(decode_password("cxazad"), decode_password("cxbaad"));
        assert_eq!(decode_password("cxa{ab"), Ok(Progress::new(26, 1)));
    }

    #[test]
    fn test_decode_rejects_out_of_range_digits() {
        // Below 'a'
        assert!(matches!(
            decode_password("cxab0d"),
            Err(PasswordError::BadDigit { index: 4, .. })
        ));
        // 26 * 25 + 1 = 651 is past the cap
        assert!(matches!(
            decode_password("cx{bad"),
            Err(PasswordError::BadDigit { index: 3, .. })
        ));
        // High digit alone overshoots
        assert!(matches!(
            decode_password("cx~aad"),
            Err(PasswordError::BadDigit { index: 2, .. })
        ));
    }

    #[test]
    fn test_failed_apply_leaves_progress_untouched() {
        let mut progress = Progress::new(7, 2);
        assert!(progress.apply_password("nonsense").is_err());
        assert_eq!(progress, Progress::new(7, 2));
        assert!(progress.apply_password("cxaeab").is_ok());
        assert_eq!(progress, Progress::new(4, 1));
    }

    #[test]
    fn test_adders_saturate_at_cap() {
        let mut progress = Progress::new(PROGRESS_CAP - 1, PROGRESS_CAP);
        progress.add_level();
        progress.add_level();
        progress.add_life();
        assert_eq!(progress.level, PROGRESS_CAP);
        assert_eq!(progress.lives, PROGRESS_CAP);
    }

    #[test]
    fn test_take_life_stops_at_zero() {
        let mut progress = Progress::new(1, 2);
        assert!(progress.take_life());
        assert!(!progress.take_life());
        assert!(!progress.take_life());
        assert_eq!(progress.lives, 0);
    }

    #[test]
    fn test_quota_thresholds() {
        let quota = |small, medium, large| Quota {
            small,
            medium,
            large,
        };
        assert_eq!(Quota::for_level(1), quota(1, 0, 0));
        assert_eq!(Quota::for_level(3), quota(0, 1, 0));
        assert_eq!(Quota::for_level(8), quota(2, 2, 0));
        assert_eq!(Quota::for_level(9), quota(0, 0, 1));
        assert_eq!(Quota::for_level(20), quota(2, 0, 2));
    }

    #[test]
    fn test_error_messages() {
        let err = decode_password("abc").unwrap_err();
        assert_eq!(err.to_string(), "password must be 6 characters, got 3");
    }

    proptest! {
        #[test]
        fn prop_round_trip(level in 0u32..=PROGRESS_CAP, lives in 0u32..=PROGRESS_CAP) {
            let password = encode_password(level, lives);
            prop_assert_eq!(password.len(), PASSWORD_LEN);
            prop_assert!(password.starts_with(PASSWORD_TAG));
            prop_assert_eq!(decode_password(&password), Ok(Progress { level, lives }));
        }

        #[test]
        fn prop_rejects_other_lengths(s in "[a-z{]{0,12}") {
            prop_assume!(s.chars().count() != PASSWORD_LEN);
            let rejected = matches!(decode_password(&s), Err(PasswordError::WrongLength { .. }));
            prop_assert!(rejected);
        }

        #[test]
        fn prop_rejects_mismatched_tag(tag in "[a-z]{2}", body in "[a-y]{4}") {
            prop_assume!(tag != PASSWORD_TAG);
            let rejected = matches!(
                decode_password(&format!("{tag}{body}")),
                Err(PasswordError::BadTag { .. })
            );
            prop_assert!(rejected);
        }
    }
}
