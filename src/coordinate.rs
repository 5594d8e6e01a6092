use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The power of ten that takes a length in nanometers to a length in Angstroms.
pub const NM_TO_ANGSTROM: i32 = 1;

/// A length read from a trajectory.
///
/// The value is kept as the decimal that was written in the file, rather than as a float. That
/// way, scaling by a power of ten is a shift of the decimal point and never picks up rounding
/// noise: `0.456` nm becomes `4.56` Å, not `4.5600000000000005` Å.
///
/// Use [`Coordinate::to_f64`] for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate(Repr);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    /// The value `digits × 10^exponent`.
    ///
    /// Invariant: `digits` holds only ascii digits and has no leading or trailing zeros. Zero is
    /// represented by empty `digits` and an `exponent` of zero.
    Finite {
        negative: bool,
        digits: String,
        exponent: i64,
    },
    Infinite {
        negative: bool,
    },
    NaN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid number")]
pub struct ParseCoordinateError;

/// Past these powers of ten for the leading digit, an `f64` is always infinite or zero.
const MAX_LEAD_EXPONENT: i64 = 309;
const MIN_LEAD_EXPONENT: i64 = -325;

impl Coordinate {
    pub const ZERO: Self = Self::zero(false);

    const fn zero(negative: bool) -> Self {
        Self(Repr::Finite {
            negative,
            digits: String::new(),
            exponent: 0,
        })
    }

    /// Build `digits × 10^exponent` from normalized, non-empty `digits`.
    ///
    /// Values an `f64` cannot hold become infinite or zero, the same as multiplying floats would.
    fn from_decimal(negative: bool, digits: String, exponent: i64) -> Self {
        let lead = (digits.len() as i64)
            .saturating_add(exponent)
            .saturating_sub(1);
        if lead > MAX_LEAD_EXPONENT {
            return Self(Repr::Infinite { negative });
        }
        if lead < MIN_LEAD_EXPONENT {
            return Self::zero(negative);
        }

        let magnitude = decimal_to_f64(&digits, exponent);
        if magnitude.is_infinite() {
            Self(Repr::Infinite { negative })
        } else if magnitude == 0.0 {
            Self::zero(negative)
        } else {
            Self(Repr::Finite {
                negative,
                digits,
                exponent,
            })
        }
    }

    /// Multiply the value by `10^places`.
    pub fn shift(&mut self, places: i32) {
        if let Repr::Finite {
            negative,
            digits,
            exponent,
        } = &mut self.0
        {
            if digits.is_empty() {
                return;
            }
            let (negative, exponent) = (*negative, *exponent);
            let digits = std::mem::take(digits);
            *self = match exponent.checked_add(i64::from(places)) {
                Some(exponent) => Self::from_decimal(negative, digits, exponent),
                None if places > 0 => Self(Repr::Infinite { negative }),
                None => Self::zero(negative),
            };
        }
    }

    /// Convert a length in nanometers to Angstroms, in place.
    pub fn to_angstrom(&mut self) {
        self.shift(NM_TO_ANGSTROM)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.0, Repr::Finite { .. })
    }

    /// Returns the closest `f64` to this value.
    pub fn to_f64(&self) -> f64 {
        match &self.0 {
            Repr::Finite {
                negative,
                digits,
                exponent,
            } => {
                let magnitude = if digits.is_empty() {
                    0.0
                } else {
                    decimal_to_f64(digits, *exponent)
                };
                if *negative {
                    -magnitude
                } else {
                    magnitude
                }
            }
            Repr::Infinite { negative: false } => f64::INFINITY,
            Repr::Infinite { negative: true } => f64::NEG_INFINITY,
            Repr::NaN => f64::NAN,
        }
    }
}

/// Correctly rounded `digits × 10^exponent`.
///
/// The literal is assembled on the stack; only digit strings too long for the buffer allocate.
fn decimal_to_f64(digits: &str, exponent: i64) -> f64 {
    use std::io::Write;

    let mut buf = [0u8; 64];
    let remaining = {
        let mut cursor = &mut buf[..];
        write!(cursor, "{digits}e{exponent}").ok().map(|_| cursor.len())
    };
    let literal = match remaining {
        Some(remaining) => std::str::from_utf8(&buf[..buf.len() - remaining]).ok(),
        None => None,
    };
    // Both are valid float literals, given the invariant on `digits`.
    match literal {
        Some(literal) => literal.parse().unwrap_or(f64::NAN),
        None => format!("{digits}e{exponent}").parse().unwrap_or(f64::NAN),
    }
}

/// Parse a signed decimal exponent, saturating where it does not fit.
fn parse_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Accepts an optional sign, followed by digits with an optional decimal point and an
    /// optional `e`/`E` exponent. The words `inf`, `infinity` and `nan` are accepted regardless
    /// of case. Magnitudes beyond the range of an `f64` read as infinity or zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
            return Ok(Self(Repr::Infinite { negative }));
        }
        if unsigned.eq_ignore_ascii_case("nan") {
            return Ok(Self(Repr::NaN));
        }

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(idx) => {
                let exponent =
                    parse_exponent(&unsigned[idx + 1..]).ok_or(ParseCoordinateError)?;
                (&unsigned[..idx], exponent)
            }
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseCoordinateError);
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(ParseCoordinateError);
        }

        let all_digits = [int_part, frac_part].concat();
        let significant = all_digits.trim_start_matches('0');
        let digits = significant.trim_end_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero(negative));
        }

        let nfrac = frac_part.len() as i64;
        let ntrailing = (significant.len() - digits.len()) as i64;
        let exponent = exponent.saturating_sub(nfrac).saturating_add(ntrailing);

        Ok(Self::from_decimal(negative, digits.to_string(), exponent))
    }
}

/// Writes the shortest plain decimal with at least one digit after the point, such as `10.0`,
/// `1.23` or `0.015`. Non-finite values are written as `inf`, `-inf` and `nan`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negative, digits, exponent) = match &self.0 {
            Repr::Finite {
                negative,
                digits,
                exponent,
            } => (*negative, digits.as_str(), *exponent),
            Repr::Infinite { negative: false } => return f.write_str("inf"),
            Repr::Infinite { negative: true } => return f.write_str("-inf"),
            Repr::NaN => return f.write_str("nan"),
        };

        if negative {
            f.write_str("-")?;
        }
        if digits.is_empty() {
            return f.write_str("0.0");
        }

        if exponent >= 0 {
            f.write_str(digits)?;
            for _ in 0..exponent {
                f.write_str("0")?;
            }
            return f.write_str(".0");
        }

        // Position of the decimal point, counted from the left of `digits`.
        let point = digits.len() as i64 + exponent;
        if point > 0 {
            let (int, frac) = digits.split_at(point as usize);
            write!(f, "{int}.{frac}")
        } else {
            f.write_str("0.")?;
            for _ in 0..-point {
                f.write_str("0")?;
            }
            f.write_str(digits)
        }
    }
}
