//! Ad-hoc `--what-if` scenarios.
//!
//! Grammar, one adjustment per expression:
//!
//! ```text
//! hourly_rate+=2        add to a numeric field
//! hours_per_week-=5     subtract from a numeric field
//! retirement=6          set a numeric field (short aliases: rate, hours, retirement, tips)
//! region=WA             move to another region
//! include_tips=true     toggle tips
//! ```

use pay_core::{Adjustment, NumericField, RegionCode, Scenario};
use regex::Regex;
use thiserror::Error;

use crate::utils::{ParseDecimalError, parse_decimal};

const WHAT_IF_PATTERN: &str = r"^\s*(?P<field>[A-Za-z_]+)\s*(?P<op>\+=|-=|=)\s*(?P<value>\S.*?)\s*$";

#[derive(Debug, Error)]
pub enum WhatIfParseError {
    #[error("invalid what-if pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot parse '{0}': expected field+=value, field-=value or field=value")]
    Syntax(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{op}' is not supported for {field}; use '='")]
    UnsupportedOperation { field: &'static str, op: String },

    #[error("invalid value for {field}: {source}")]
    InvalidNumber {
        field: NumericField,
        #[source]
        source: ParseDecimalError,
    },

    #[error("invalid region '{0}'")]
    InvalidRegion(String),

    #[error("invalid value for include_tips '{0}': expected true or false")]
    InvalidFlag(String),
}

fn numeric_field(name: &str) -> Option<NumericField> {
    match name {
        "rate" => Some(NumericField::HourlyRate),
        "hours" => Some(NumericField::HoursPerWeek),
        "retirement" => Some(NumericField::RetirementContributionPct),
        "tips" => Some(NumericField::TipsPerHour),
        other => NumericField::parse(other),
    }
}

fn require_set(
    field: &'static str,
    op: &str,
) -> Result<(), WhatIfParseError> {
    if op == "=" {
        Ok(())
    } else {
        Err(WhatIfParseError::UnsupportedOperation {
            field,
            op: op.to_string(),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, WhatIfParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(WhatIfParseError::InvalidFlag(value.to_string())),
    }
}

/// Parses one what-if expression into an [`Adjustment`].
pub fn parse_adjustment(expr: &str) -> Result<Adjustment, WhatIfParseError> {
    let re = Regex::new(WHAT_IF_PATTERN)?;
    let caps = re
        .captures(expr)
        .ok_or_else(|| WhatIfParseError::Syntax(expr.to_string()))?;
    let field = caps["field"].to_ascii_lowercase();
    let op = &caps["op"];
    let value = &caps["value"];

    match field.as_str() {
        "region" => {
            require_set("region", op)?;
            let region: RegionCode = value
                .parse()
                .map_err(|_| WhatIfParseError::InvalidRegion(value.to_string()))?;
            Ok(Adjustment::SetRegion { region })
        }
        "include_tips" => {
            require_set("include_tips", op)?;
            Ok(Adjustment::SetIncludeTips {
                value: parse_flag(value)?,
            })
        }
        name => {
            let field = numeric_field(name).ok_or_else(|| WhatIfParseError::UnknownField(name.to_string()))?;
            let amount = parse_decimal(value).map_err(|source| WhatIfParseError::InvalidNumber { field, source })?;
            Ok(match op {
                "+=" => Adjustment::Add {
                    field,
                    value: amount,
                },
                "-=" => Adjustment::Add {
                    field,
                    value: -amount,
                },
                _ => Adjustment::Set {
                    field,
                    value: amount,
                },
            })
        }
    }
}

/// Parses a what-if expression into a [`Scenario`] labelled with the
/// expression itself.
pub fn parse_scenario(expr: &str) -> Result<Scenario, WhatIfParseError> {
    let adjustment = parse_adjustment(expr)?;
    let label: String = expr.split_whitespace().collect();
    Ok(Scenario::new(format!("what-if:{label}"), label, adjustment))
}
