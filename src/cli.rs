// src/cli.rs

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use supply_relief::io::generator::NetworkSpec;
use supply_relief::resolution::config::{ResolverConfig, StrategyKind};

const USAGE: &str = "usage: supply-relief \
[--hospitals <csv> --suppliers <csv> | --generate <H>x<S>] [--seed <n>] \
[--strategy greedy|exhaustive] [--max-candidates <n>] [--max-steps <n>] \
[--time-budget-ms <n>] [--exclude <name>]... [--report <dir>]";

#[derive(Debug)]
pub enum NetworkSource {
    Csv {
        hospitals: PathBuf,
        suppliers: PathBuf,
    },
    Generated(NetworkSpec),
}

#[derive(Debug)]
pub struct Args {
    pub source: NetworkSource,
    pub resolver: ResolverConfig,
    pub report_dir: Option<PathBuf>,
    /// Entities to leave out in a what-if run.
    pub exclude: Vec<String>,
}

pub fn parse_args() -> Result<Args> {
    parse_from(env::args().skip(1))
}

fn parse_from<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut hospitals = None;
    let mut suppliers = None;
    let mut generated = None;
    let mut seed = None;
    let mut resolver = ResolverConfig::default();
    let mut report_dir = None;
    let mut exclude = Vec::new();

    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| anyhow!("missing value for {arg}. {USAGE}"))
        };
        match arg.as_str() {
            "--hospitals" => hospitals = Some(PathBuf::from(value()?)),
            "--suppliers" => suppliers = Some(PathBuf::from(value()?)),
            "--generate" => generated = Some(parse_shape(&value()?)?),
            "--seed" => seed = Some(value()?.parse::<u64>().context("--seed")?),
            "--strategy" => {
                resolver.strategy = value()?.parse::<StrategyKind>().map_err(|e| anyhow!(e))?
            }
            "--max-candidates" => {
                resolver.exhaustive.max_candidates =
                    Some(value()?.parse().context("--max-candidates")?)
            }
            "--max-steps" => {
                resolver.exhaustive.max_steps = Some(value()?.parse().context("--max-steps")?)
            }
            "--time-budget-ms" => {
                resolver.exhaustive.time_budget_ms =
                    Some(value()?.parse().context("--time-budget-ms")?)
            }
            "--report" => report_dir = Some(PathBuf::from(value()?)),
            "--exclude" => exclude.push(value()?),
            "--help" | "-h" => bail!("{USAGE}"),
            other => bail!("unknown argument: {other}. {USAGE}"),
        }
    }

    let source = match (hospitals, suppliers, generated) {
        (Some(hospitals), Some(suppliers), None) => NetworkSource::Csv {
            hospitals,
            suppliers,
        },
        (None, None, shape) => {
            let (h, s) = shape.unwrap_or((4, 2));
            let defaults = NetworkSpec::default();
            NetworkSource::Generated(NetworkSpec {
                hospitals: h,
                suppliers: s,
                seed: seed.unwrap_or(defaults.seed),
                ..defaults
            })
        }
        (_, _, Some(_)) => bail!("--generate cannot be combined with CSV inputs. {USAGE}"),
        _ => bail!("--hospitals and --suppliers must be given together. {USAGE}"),
    };

    Ok(Args {
        source,
        resolver,
        report_dir,
        exclude,
    })
}

/// Parses `"<hospitals>x<suppliers>"`, e.g. `"6x3"`.
fn parse_shape(raw: &str) -> Result<(usize, usize)> {
    let (h, s) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("--generate expects <hospitals>x<suppliers>, got '{raw}'"))?;
    Ok((
        h.trim().parse().context("--generate hospitals")?,
        s.trim().parse().context("--generate suppliers")?,
    ))
}
