//! Plain-text rendering of breakdowns, scenario results and region lists.
//!
//! All rounding for display happens here; the engine hands over unrounded
//! values.

use std::fmt::Write;

use pay_core::calculations::common::round_half_up;
use pay_core::{PayBreakdown, PayInputs, RegionalTaxRule, ScenarioResult, TaxTable};
use rust_decimal::Decimal;

/// Formats `value` as US dollars, e.g. `$25,312.20` or `-$1,872.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Formats a signed amount with an explicit `+` for gains.
pub fn format_delta(value: Decimal) -> String {
    let formatted = format_currency(value);
    if formatted.starts_with('-') || round_half_up(value).is_zero() {
        formatted
    } else {
        format!("+{formatted}")
    }
}

/// Formats a percentage value (already scaled to 0..100), e.g. `18.87%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}

fn line(
    out: &mut String,
    label: &str,
    value: String,
) {
    let _ = writeln!(out, "  {label:<28}{value:>16}");
}

/// Renders the baseline estimate.
pub fn render_breakdown(
    inputs: &PayInputs,
    rule: &RegionalTaxRule,
    tax_year: i32,
    breakdown: &PayBreakdown,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Paycheck estimate: {} at {}/hr for {} hours/week ({tax_year} tax tables)",
        rule.region_name,
        format_currency(inputs.hourly_rate),
        inputs.hours_per_week.normalize(),
    );
    if inputs.include_tips && !inputs.tips_per_hour.is_zero() {
        let _ = writeln!(out, "  plus {}/hr in tips", format_currency(inputs.tips_per_hour));
    }
    if rule.is_below_minimum_wage(inputs.hourly_rate) {
        let _ = writeln!(
            out,
            "  note: {} is below the {} minimum wage of {}/hr",
            format_currency(inputs.hourly_rate),
            rule.region_name,
            format_currency(rule.minimum_wage),
        );
    }
    out.push('\n');

    line(&mut out, "Weekly gross", format_currency(breakdown.weekly_gross));
    line(&mut out, "Annual gross", format_currency(breakdown.annual_gross));
    if !breakdown.pre_tax_retirement_contribution.is_zero() {
        line(
            &mut out,
            "Pre-tax retirement",
            format_currency(breakdown.pre_tax_retirement_contribution),
        );
        line(&mut out, "Taxable income", format_currency(breakdown.taxable_income));
    }
    line(&mut out, "Federal income tax", format_currency(breakdown.federal_tax));
    line(
        &mut out,
        &format!("{} income tax", rule.region_code),
        format_currency(breakdown.regional_tax),
    );
    line(&mut out, "Social Security", format_currency(breakdown.social_security_tax));
    line(&mut out, "Medicare", format_currency(breakdown.medicare_tax));
    line(&mut out, "Total tax", format_currency(breakdown.total_tax));
    out.push('\n');
    line(&mut out, "Annual take-home", format_currency(breakdown.annual_net));
    line(&mut out, "Monthly take-home", format_currency(breakdown.monthly_net));
    line(&mut out, "Weekly take-home", format_currency(breakdown.weekly_net));
    line(&mut out, "Hourly take-home", format_currency(breakdown.hourly_net));
    line(&mut out, "Effective tax rate", format_percent(breakdown.effective_tax_rate_pct));
    line(&mut out, "Take-home share", format_percent(breakdown.net_pay_ratio_pct));

    out
}

/// Renders evaluated scenarios, one per line, in the order given.
pub fn render_scenarios(results: &[&ScenarioResult]) -> String {
    let mut out = String::from("What-if scenarios:\n");
    if results.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<32}{:>14}{:>14}{:>16}",
        "Scenario", "Weekly", "Annual", "Annual net"
    );
    for result in results {
        let _ = writeln!(
            out,
            "  {:<32}{:>14}{:>14}{:>16}",
            result.scenario.label,
            format_delta(result.weekly_net_delta),
            format_delta(result.annual_net_delta),
            format_currency(result.breakdown.annual_net),
        );
    }
    out
}

/// Renders every region of `table`, sorted by code.
pub fn render_regions(table: &TaxTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Regions in the {} tax tables:", table.tax_year());
    let _ = writeln!(
        out,
        "  {:<4}{:<24}{:>10}{:>12}  {}",
        "Code", "Name", "Income tax", "Min wage", "Overtime"
    );
    for rule in table.regional_rules() {
        let rate = if rule.no_income_tax {
            "none".to_string()
        } else {
            format_percent(rule.flat_rate * Decimal::ONE_HUNDRED)
        };
        let _ = writeln!(
            out,
            "  {:<4}{:<24}{:>10}{:>12}  {}",
            rule.region_code.as_str(),
            rule.region_name,
            rate,
            format_currency(rule.minimum_wage),
            rule.overtime_rule.as_str(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(25312.2)), "$25,312.20");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(600)), "$600.00");
    }

    #[test]
    fn format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(486.775)), "$486.78");
        assert_eq!(format_currency(dec!(486.7730769)), "$486.77");
    }

    #[test]
    fn format_currency_negative_and_zero() {
        assert_eq!(format_currency(dec!(-1872)), "-$1,872.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn format_delta_marks_gains() {
        assert_eq!(format_delta(dec!(1414.4)), "+$1,414.40");
        assert_eq!(format_delta(dec!(-36)), "-$36.00");
        assert_eq!(format_delta(dec!(0)), "$0.00");
    }

    #[test]
    fn format_percent_two_places() {
        assert_eq!(format_percent(dec!(18.8711538)), "18.87%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
    }
}
