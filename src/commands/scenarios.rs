use anyhow::Result;

use hrafnar_verify::domain::entities::Concurrency;
use hrafnar_verify::domain::services::{builtin_scenarios, gate, GateDecision};
use hrafnar_verify::infrastructure::ProcessEnv;
use hrafnar_verify::presentation::ScenarioRow;

use super::Context;

/// List the built-in scenarios and whether each could run right now
pub fn cmd_scenarios(ctx: &Context) -> Result<bool> {
    let rows: Vec<ScenarioRow> = builtin_scenarios()
        .iter()
        .map(|scenario| {
            let name = scenario.name();
            let missing = match gate(scenario, &ProcessEnv) {
                GateDecision::Proceed(_) => Vec::new(),
                GateDecision::Skip { missing } => missing,
            };
            ScenarioRow {
                enabled: ctx.config.scenario_enabled(&name),
                name,
                tag: scenario.tag().to_string(),
                dir: scenario.dir().display().to_string(),
                serial: scenario.concurrency() == Concurrency::Serial,
                missing,
            }
        })
        .collect();

    let mut out = std::io::stdout().lock();
    ctx.renderer().scenarios(&mut out, &rows)?;
    Ok(true)
}
