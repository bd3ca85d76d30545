//! line: post-simulation analysis of a small production line.
//!
//! Loads an embedded event log of a three-machine line with one transporter
//! (setup, overlapping jobs, a breakdown, charging and a dependency wait),
//! prints the resource-state breakdown and steady-state KPIs, and writes
//! CSV and JSON reports to `output/line/`.
//!
//! ```text
//! cargo run -p line                      # default analysis config
//! cargo run -p line -- config.json       # e.g. { "warm_up_fraction": 0.0, "verbose": true }
//! ```

mod logging;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use ps_analysis::{AnalysisConfig, PostProcessor};
use ps_core::TimeType;
use ps_log::load_event_log_reader;
use ps_output::{export_report, write_aggregated_json, CsvWriter};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/line";

/// Resources of the line; M3 is installed but never scheduled.
const RESOURCES: [&str; 4] = ["M1", "M2", "M3", "TR1"];

// ── Event log CSV ─────────────────────────────────────────────────────────────

// Arrival order, as exported by the simulator (leading index column).
const EVENT_LOG_CSV: &str = "\
,Time,Resource,State,State Type,Activity,Product,Expected End Time,Origin location,Target location\n\
0,0.0,source,S1,Source,created product,Product_A_0,,,\n\
1,0.0,TR1,TP1,Transport,start state,Product_A_0,2.0,\"[0, 0]\",\"[10, 0]\"\n\
2,0.0,TR1,LD1,Loading,start state,Product_A_0,0.5,,\n\
3,0.5,TR1,LD1,Loading,end state,Product_A_0,,,\n\
4,1.5,TR1,UL1,Unloading,start state,Product_A_0,2.0,,\n\
5,2.0,TR1,UL1,Unloading,end state,Product_A_0,,,\n\
6,2.0,TR1,TP1,Transport,end state,Product_A_0,,,\n\
7,2.0,M1,ST1,Setup,start state,,4.0,,\n\
8,4.0,M1,ST1,Setup,end state,,,,\n\
9,4.0,M1,P1,Production,start state,Product_A_0,10.0,,\n\
10,5.0,source,S1,Source,created product,Product_A_1,,,\n\
11,5.0,TR1,TP1,Transport,start state,Product_A_1,7.0,\"[0, 0]\",\"[10, 0]\"\n\
12,7.0,TR1,TP1,Transport,end state,Product_A_1,,,\n\
13,7.0,M1,P1,Production,start state,Product_A_1,13.0,,\n\
14,8.0,source,S1,Source,created product,Product_B_0,,,\n\
15,9.0,M2,P2,Production,start state,Product_B_0,20.0,,\n\
16,10.0,M1,P1,Production,end state,Product_A_0,,,\n\
17,10.0,TR1,TP1,Transport,start state,Product_A_0,12.0,\"[10, 0]\",\"[20, 0]\"\n\
18,11.0,M1,BS1,Breakdown,start state,,14.0,,\n\
19,11.0,M1,P1,Production,start interrupt,Product_A_1,,,\n\
20,12.0,TR1,TP1,Transport,end state,Product_A_0,,,\n\
21,12.0,sink,K1,Sink,finished product,Product_A_0,,,\n\
22,13.0,TR1,CH1,Charging,start state,,17.0,,\n\
23,14.0,M1,BS1,Breakdown,end state,,,,\n\
24,14.0,M1,P1,Production,end interrupt,Product_A_1,,,\n\
25,16.0,M1,P1,Production,end state,Product_A_1,,,\n\
26,17.0,TR1,CH1,Charging,end state,,,,\n\
27,17.0,TR1,TP1,Transport,start state,Product_A_1,19.0,\"[10, 0]\",\"[20, 0]\"\n\
28,19.0,TR1,TP1,Transport,end state,Product_A_1,,,\n\
29,19.0,sink,K1,Sink,finished product,Product_A_1,,,\n\
30,20.0,M2,P2,Production,end state,Product_B_0,,,\n\
31,20.0,TR1,TP1,Transport,start state,Product_B_0,22.0,\"[15, 5]\",\"[20, 0]\"\n\
32,22.0,TR1,TP1,Transport,end state,Product_B_0,,,\n\
33,22.0,sink,K1,Sink,finished product,Product_B_0,,,\n\
34,22.0,M2,DP1,Dependency,start state,,25.0,,\n\
35,25.0,M2,DP1,Dependency,end state,,,,\n\
";

// ── Configuration ─────────────────────────────────────────────────────────────

/// Analysis config from the JSON file named by the first argument, or the
/// default when none is given.
fn load_config() -> Result<AnalysisConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(AnalysisConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading analysis config {path}"))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing analysis config {path}"))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init();

    println!("=== line: prodsys post-simulation analysis ===");

    // 1. Config and event log.
    let config = load_config()?;
    let log = load_event_log_reader(Cursor::new(EVENT_LOG_CSV))?;
    println!(
        "Event log: {} rows, {} resources  |  warm-up fraction: {}",
        log.len(),
        log.resources().len(),
        config.warm_up_fraction
    );

    // 2. Processor.
    let post = PostProcessor::builder(log)
        .config(config)
        .resources(RESOURCES)
        .build()?;

    let t0 = Instant::now();
    let horizon = post.horizon()?;
    let states = post.aggregated_resource_states_dict()?;
    let elapsed = t0.elapsed();
    println!(
        "Horizon: {horizon}  |  warm-up cutoff: {:.2}  |  analysed in {:.3} ms",
        post.warm_up_cutoff_time()?,
        elapsed.as_secs_f64() * 1e3
    );
    println!();

    // 3. Resource-state table.
    print!("{:<10}", "Resource");
    for time_type in TimeType::ALL {
        print!(" {:>7}", time_type.code());
    }
    println!();
    println!("{}", "-".repeat(10 + 8 * TimeType::ALL.len()));
    for (resource, shares) in &states {
        print!("{resource:<10}");
        for time_type in TimeType::ALL {
            let pct = shares.get(&time_type).copied().unwrap_or(0.0);
            print!(" {pct:>6.1}%");
        }
        println!();
    }
    println!();

    // 4. Steady-state KPIs per product type.
    let output = post.aggregated_throughput_data_dict()?;
    let throughput_time = post.aggregated_throughput_time_data_dict()?;
    let wip = post.aggregated_wip_data_dict()?;

    println!("{:<12} {:>8} {:>16} {:>8}", "Product", "Output", "Throughput time", "WIP");
    println!("{}", "-".repeat(47));
    for (product_type, mean_wip) in &wip {
        let count = output.get(product_type).copied().unwrap_or(0.0);
        let tpt = throughput_time
            .get(product_type)
            .map_or_else(|| "-".to_owned(), |t| format!("{t:.2}"));
        println!("{product_type:<12} {count:>8} {tpt:>16} {mean_wip:>8.2}");
    }
    println!();

    // 5. Reports.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let summary = export_report(&post, &mut writer)?;
    write_aggregated_json(&post, &Path::new(OUTPUT_DIR).join("aggregated.json"))?;
    tracing::info!(dir = OUTPUT_DIR, kpis = summary.kpis, "reports written");

    println!("Reports written to {OUTPUT_DIR}/");
    println!("  resource_states.csv            : {} rows", summary.segments);
    println!("  aggregated_resource_states.csv : {} rows", summary.resource_states);
    println!("  kpis.csv                       : {} rows", summary.kpis);
    println!("  aggregated.json");

    Ok(())
}
