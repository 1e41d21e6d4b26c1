// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Input Validation

use crate::params::SimulationParameters;
use crate::types::DailyRecord;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("no daily records supplied")]
    Empty,

    #[error("day {day}: {field} must be a finite number")]
    NonFinite { day: u32, field: &'static str },

    #[error("day {day}: token price must be positive, got {price}")]
    NonPositivePrice { day: u32, price: f64 },

    #[error("day {day}: reward pool must not be negative, got {value}")]
    NegativeRewardPool { day: u32, value: f64 },

    #[error("record {index}: expected day {expected}, got {actual}")]
    DayOutOfSequence { index: usize, expected: u32, actual: u32 },

    #[error("day {day}: reward pool {reward_pool} exceeds total supply {total_supply}")]
    NegativeCirculatingSupply { day: u32, reward_pool: f64, total_supply: f64 },

    #[error("quarter {quarter}: circulating supply is zero on day {day}")]
    ZeroCirculatingSupply { quarter: u32, day: u32 },

    #[error("quarter {quarter}: estimated liquidity is {liquidity}")]
    NonPositiveLiquidity { quarter: u32, liquidity: f64 },

    #[error("malformed records: {0}")]
    Malformed(String),
}

/// Check the record sequence against the invariants the aggregator relies
/// on: non-empty, consecutive days, finite positive prices, and a reward
/// pool that never exceeds the total supply.
pub fn validate_records(
    records: &[DailyRecord],
    params: &SimulationParameters,
) -> Result<(), InputError> {
    let first = records.first().ok_or(InputError::Empty)?;

    for (index, record) in records.iter().enumerate() {
        let expected = first.day.checked_add(index as u32).unwrap_or(u32::MAX);
        if record.day != expected {
            return Err(InputError::DayOutOfSequence {
                index,
                expected,
                actual: record.day,
            });
        }

        let day = record.day;
        for (field, value) in [
            ("token_price", record.token_price),
            ("reward_pool_tokens", record.reward_pool_tokens),
            ("new_nfts_value", record.new_nfts_value),
        ] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { day, field });
            }
        }
        if record.token_price <= 0.0 {
            return Err(InputError::NonPositivePrice { day, price: record.token_price });
        }
        if record.reward_pool_tokens < 0.0 {
            return Err(InputError::NegativeRewardPool { day, value: record.reward_pool_tokens });
        }
        if params.total_token_supply - record.reward_pool_tokens < 0.0 {
            return Err(InputError::NegativeCirculatingSupply {
                day,
                reward_pool: record.reward_pool_tokens,
                total_supply: params.total_token_supply,
            });
        }
    }
    Ok(())
}
