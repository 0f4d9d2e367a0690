//! roi-runner: headless caller of the ROI projection engine.
//!
//! Usage:
//!   roi-runner --visitors 50000 --cvr 2.5 --aov 80 --ad-spend 10000 --scenario expected
//!   roi-runner --currency COP --months 12 --reinvest 75 --json
//!   roi-runner --config calculator.json --ipc-mode
//!
//! Unset inputs take the configured defaults; unset monetary inputs are
//! converted into the selected currency first. Set RUST_LOG=debug to see
//! the month-by-month simulation.

use anyhow::{anyhow, Result};
use roi_core::{
    calculator::{evaluate, CalculatorInputs, CalculatorReport},
    config::{CalculatorConfig, CurrencyConfig},
    roi::percent_change,
    scenario::Scenario,
    state::StateMetrics,
    types::Month,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Calculate {
        inputs: CalculatorInputs,
        #[serde(default)]
        currency: Option<String>,
    },
    Defaults {
        #[serde(default)]
        currency: Option<String>,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct ReportEnvelope<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    currency: &'a str,
    /// False when the ROI multiple should be shown as unknown.
    roi_plausible: bool,
    warnings: Vec<String>,
    report: &'a CalculatorReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match arg_value(&args, "--config") {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    let currency = match arg_value(&args, "--currency") {
        Some(code) => config.currency(code)?,
        None => config.default_currency()?,
    };

    if args.iter().any(|a| a == "--ipc-mode") {
        return run_ipc_loop(&config);
    }

    let inputs = inputs_from_args(&args, &config, currency)?;
    let report = evaluate(&inputs);
    let envelope = build_envelope(&config, currency, &report);

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print_summary(&config, currency, &report);
    }
    Ok(())
}

fn inputs_from_args(
    args: &[String],
    config: &CalculatorConfig,
    currency: &CurrencyConfig,
) -> Result<CalculatorInputs> {
    let defaults = config.default_inputs(currency);
    let m = defaults.metrics;

    let mut inputs = defaults;
    inputs.metrics.monthly_visitors = parse_arg(args, "--visitors", m.monthly_visitors)?;
    inputs.metrics.current_cvr = parse_arg(args, "--cvr", m.current_cvr)?;
    inputs.metrics.aov = parse_arg(args, "--aov", m.aov)?;
    inputs.metrics.ad_spend = parse_arg(args, "--ad-spend", m.ad_spend)?;
    inputs.scenario = parse_arg::<Scenario>(args, "--scenario", defaults.scenario)?;
    inputs.reinvestment_percent =
        parse_arg(args, "--reinvest", defaults.reinvestment_percent)?;
    inputs.monthly_investment = parse_arg(args, "--investment", defaults.monthly_investment)?;
    inputs.projection_months = parse_arg::<Month>(args, "--months", defaults.projection_months)?;
    Ok(inputs)
}

fn build_envelope<'a>(
    config: &CalculatorConfig,
    currency: &'a CurrencyConfig,
    report: &'a CalculatorReport,
) -> ReportEnvelope<'a> {
    let warnings: Vec<String> = config
        .range_warnings(&report.inputs, currency)
        .iter()
        .map(|w| {
            log::warn!("{} ({})", w, currency.code);
            w.to_string()
        })
        .collect();

    let roi_plausible = config.roi_is_plausible(report.roi.roi_multiple);
    if !roi_plausible {
        log::warn!(
            "ROI multiple {:.1}x exceeds {:.0}x; check that every amount uses {}",
            report.roi.roi_multiple,
            config.max_realistic_roi,
            currency.code
        );
    }

    ReportEnvelope {
        generated_at: chrono::Utc::now(),
        currency: &currency.code,
        roi_plausible,
        warnings,
        report,
    }
}

fn run_ipc_loop(config: &CalculatorConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        if handle.read_line(&mut buffer)? == 0 {
            break;
        }
        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(line) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Calculate { inputs, currency } => {
                match resolve_currency(config, currency.as_deref()) {
                    Ok(currency) => {
                        let report = evaluate(&inputs);
                        let envelope = build_envelope(config, currency, &report);
                        writeln!(stdout, "{}", serde_json::to_string(&envelope)?)?;
                    }
                    Err(e) => write_error(&mut stdout, &e.to_string())?,
                }
            }
            IpcCommand::Defaults { currency } => {
                match resolve_currency(config, currency.as_deref()) {
                    Ok(currency) => {
                        let defaults = config.default_inputs(currency);
                        writeln!(stdout, "{}", serde_json::to_string(&defaults)?)?;
                    }
                    Err(e) => write_error(&mut stdout, &e.to_string())?,
                }
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn resolve_currency<'a>(
    config: &'a CalculatorConfig,
    code: Option<&str>,
) -> roi_core::error::RoiResult<&'a CurrencyConfig> {
    match code {
        Some(code) => config.currency(code),
        None => config.default_currency(),
    }
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(config: &CalculatorConfig, currency: &CurrencyConfig, report: &CalculatorReport) {
    let inputs = &report.inputs;
    let sym = currency.symbol.as_str();

    println!("ROI projection: {} scenario, {} months ({})", inputs.scenario, inputs.projection_months, currency.code);
    println!("  visitors:     {}", group_thousands(inputs.metrics.monthly_visitors));
    println!("  cvr:          {:.2}%", inputs.metrics.current_cvr);
    println!("  aov:          {}", money(sym, inputs.metrics.aov));
    println!("  ad spend:     {}", money(sym, inputs.metrics.ad_spend));
    println!("  reinvest:     {:.0}%", inputs.reinvestment_percent);
    println!("  investment:   {}/month", money(sym, inputs.monthly_investment));
    println!("  tier:         {}", report.qualification_tier.as_str());
    println!();

    println!("=== CURRENT vs IMPROVED (full ramp) ===");
    print_state_comparison(sym, &report.current_state, &report.improved_state);
    println!(
        "  +{} per month once fully implemented",
        money(sym, report.additional_monthly_revenue)
    );
    println!();

    println!("=== MONTHLY PROJECTION ===");
    println!("  month | current        | improved       | scaled");
    for p in &report.projection {
        println!(
            "  {:>5} | {:>14} | {:>14} | {:>14}",
            p.month,
            money(sym, p.current),
            money(sym, p.improved),
            money(sym, p.scaled)
        );
    }
    if let Some(last) = report.projection.last() {
        println!(
            "  total | {:>14} | {:>14} | {:>14}",
            money(sym, last.current_cumulative),
            money(sym, last.improved_cumulative),
            money(sym, last.scaled_cumulative)
        );
    }
    println!();

    let scaled = &report.scaled_state;
    println!("=== SCALED ({:.0}% reinvested) ===", inputs.reinvestment_percent);
    println!("  total revenue:      {}", money(sym, scaled.total_revenue));
    println!("  additional revenue: {}", money(sym, scaled.total_additional_revenue));
    println!("  incremental:        {}", money(sym, report.incremental_revenue));
    println!("  ad spent:           {}", money(sym, scaled.total_ad_spent));
    println!("  blended roas:       {:.2}x", scaled.state.roas);
    println!();

    let roi = &report.roi;
    println!("=== ROI ===");
    println!("  total investment:   {}", money(sym, roi.total_investment));
    println!("  additional revenue: {}", money(sym, roi.total_additional_revenue));
    if config.roi_is_plausible(roi.roi_multiple) {
        println!("  roi:                {:.1}x (+{:.0}%)", roi.roi_multiple, roi.roi_percent);
    } else {
        println!("  roi:                —");
    }
    println!("  payback:            {}", format_payback(roi.payback_months));
}

fn print_state_comparison(sym: &str, current: &StateMetrics, improved: &StateMetrics) {
    let rows = [
        ("cvr", format!("{:.2}%", current.cvr), format!("{:.2}%", improved.cvr), current.cvr, improved.cvr),
        ("orders", group_thousands(current.orders), group_thousands(improved.orders), current.orders, improved.orders),
        ("revenue", money(sym, current.revenue), money(sym, improved.revenue), current.revenue, improved.revenue),
        ("roas", format!("{:.2}x", current.roas), format!("{:.2}x", improved.roas), current.roas, improved.roas),
        ("cpa", format!("{sym}{:.2}", current.cpa), format!("{sym}{:.2}", improved.cpa), current.cpa, improved.cpa),
        ("rps", format!("{sym}{:.2}", current.rps), format!("{sym}{:.2}", improved.rps), current.rps, improved.rps),
    ];
    for (name, before, after, a, b) in rows {
        println!("  {name:<8} {before:>14} -> {after:>14}  ({:+.1}%)", percent_change(a, b));
    }
}

/// "∞" when it never pays back, "< 1 month", otherwise whole months rounded up.
fn format_payback(months: f64) -> String {
    if !months.is_finite() || months <= 0.0 {
        return "∞".to_string();
    }
    if months < 1.0 {
        return "< 1 month".to_string();
    }
    match months.ceil() as u64 {
        1 => "1 month".to_string(),
        n => format!("{n} months"),
    }
}

fn money(symbol: &str, value: f64) -> String {
    if value < 0.0 {
        format!("-{symbol}{}", group_thousands(-value))
    } else {
        format!("{symbol}{}", group_thousands(value))
    }
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}

/// Value of `--flag value`, falling back to `default` when the flag is
/// absent. A present but unparsable value is an error.
fn parse_arg<T: FromStr>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match arg_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("invalid value '{raw}' for {flag}: {e}")),
        None => Ok(default),
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
