use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::account::{AccountError, AmountRule};

/// Number of fractional digits every balance and amount is kept at.
pub const CURRENCY_SCALE: u32 = 2;

/// Largest mantissa a `Decimal` can hold (96 bits).
const MAX_MANTISSA: i128 = (1 << 96) - 1;

fn overflow(amount: Decimal) -> AccountError {
    AccountError::InvalidAmount {
        reason: AmountRule::Overflow { amount },
    }
}

/// Rounds to cents (half away from zero) and pads the scale, so `5` becomes `5.00`.
/// Values too large to carry two fractional digits are rejected.
pub fn normalize(amount: Decimal) -> Result<Decimal, AccountError> {
    let rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let padding = 10i128.pow(CURRENCY_SCALE - rounded.scale());
    match rounded.mantissa().checked_mul(padding) {
        Some(mantissa) if mantissa.abs() <= MAX_MANTISSA => {
            Ok(Decimal::from_i128_with_scale(mantissa, CURRENCY_SCALE))
        }
        _ => Err(overflow(amount)),
    }
}

/// Exact sum of two cent values. `Decimal` addition silently drops fractional
/// digits once the mantissa is full, so a sum that lost its scale is an overflow.
pub fn checked_add(balance: Decimal, amount: Decimal) -> Result<Decimal, AccountError> {
    balance
        .checked_add(amount)
        .filter(|sum| sum.scale() == CURRENCY_SCALE)
        .ok_or_else(|| overflow(amount))
}

/// Parses user supplied text into a decimal, without any range checks.
pub fn parse_amount(raw: &str) -> Result<Decimal, AccountError> {
    Decimal::from_str(raw.trim()).map_err(|_| AccountError::InvalidAmount {
        reason: AmountRule::NotNumeric {
            raw: raw.to_owned(),
        },
    })
}

/// Amount moved by a deposit or withdrawal: strictly positive once rounded to cents.
pub fn positive(amount: Decimal) -> Result<Decimal, AccountError> {
    let amount = normalize(amount)?;
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(AccountError::InvalidAmount {
            reason: AmountRule::NotPositive { amount },
        })
    }
}

/// Opening balance: zero is fine, anything below it is not.
pub fn non_negative(amount: Decimal) -> Result<Decimal, AccountError> {
    // checked on the raw value, so -0.001 is rejected instead of rounding to zero
    if amount < Decimal::ZERO {
        return Err(AccountError::InvalidAmount {
            reason: AmountRule::Negative { amount },
        });
    }
    normalize(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn normalize_rounds_half_away_from_zero() {
        assert_eq!(normalize(d("1.005")).unwrap(), d("1.01"));
        assert_eq!(normalize(d("1.004")).unwrap(), d("1.00"));
        assert_eq!(normalize(d("-1.005")).unwrap(), d("-1.01"));
        assert_eq!(normalize(d("5")).unwrap().to_string(), "5.00");
        assert_eq!(normalize(d("0.1")).unwrap().to_string(), "0.10");
    }

    #[test]
    fn parse_amount_accepts_padded_numbers() {
        assert_eq!(parse_amount(" 250.75 ").unwrap(), d("250.75"));
        assert_eq!(parse_amount("-3").unwrap(), d("-3"));
    }

    #[test]
    fn parse_amount_rejects_text() {
        for raw in ["", "abc", "1.2.3", "12,50"] {
            let err = parse_amount(raw).unwrap_err();
            assert_eq!(
                err,
                AccountError::InvalidAmount {
                    reason: AmountRule::NotNumeric {
                        raw: raw.to_owned()
                    }
                }
            );
        }
    }

    #[test]
    fn positive_rejects_zero_and_sub_cent_amounts() {
        assert!(positive(Decimal::ZERO).is_err());
        assert!(positive(d("-0.01")).is_err());
        // rounds down to 0.00
        let err = positive(d("0.004")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount: 0.00 is not positive");
        assert_eq!(positive(d("0.005")).unwrap(), d("0.01"));
    }

    #[test]
    fn non_negative_allows_zero() {
        assert_eq!(non_negative(Decimal::ZERO).unwrap().to_string(), "0.00");
        assert!(matches!(
            non_negative(d("-0.001")),
            Err(AccountError::InvalidAmount {
                reason: AmountRule::Negative { .. }
            })
        ));
    }

    #[test]
    fn normalize_rejects_values_without_room_for_cents() {
        let near_max = d("79228162514264337593543950334");
        assert!(matches!(
            normalize(near_max),
            Err(AccountError::InvalidAmount {
                reason: AmountRule::Overflow { .. }
            })
        ));
        // largest value that still has two fractional digits
        let largest = d("792281625142643375935439503.35");
        assert_eq!(normalize(largest).unwrap().scale(), CURRENCY_SCALE);
        assert!(non_negative(near_max).is_err());
    }

    #[test]
    fn checked_add_keeps_cents() {
        assert_eq!(checked_add(d("0.10"), d("0.20")).unwrap(), d("0.30"));
        assert_eq!(
            checked_add(d("792281625142643375935439503.34"), d("0.01")).unwrap(),
            d("792281625142643375935439503.35")
        );
        let err = checked_add(d("792281625142643375935439503.35"), d("0.01")).unwrap_err();
        assert_eq!(
            err,
            AccountError::InvalidAmount {
                reason: AmountRule::Overflow { amount: d("0.01") }
            }
        );
    }
}
