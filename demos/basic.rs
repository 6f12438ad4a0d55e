//! Basic example of using the geo_agent library.

use chrono::{NaiveDate, Weekday};
use geo_agent::config::{Config, ScheduleConfig};
use geo_agent::segment::Segment;
use geo_agent::{export, Planner};
use std::env;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get an Overpass-style JSON export from the command line or use default
    let args: Vec<String> = env::args().collect();
    let input_path = if args.len() > 1 {
        &args[1]
    } else {
        "data/streets.json"
    };

    // Load segments
    println!("Loading street segments from: {}", input_path);
    let raw = fs::read_to_string(input_path)?;
    let segments = Segment::from_json_records(&raw)?;
    println!("Loaded {} segments", segments.len());

    // Configure the pipeline
    let start_date =
        NaiveDate::from_ymd_opt(2026, 9, 7).ok_or("invalid start date")?;
    let config = Config::new()
        .with_num_agents(3)
        .with_seed(42)
        .with_schedule(ScheduleConfig::new(
            [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
            start_date,
            3,
        ));

    // Run the pipeline
    let planner = Planner::new(segments, config);
    let plan = planner.plan()?;

    if plan.is_empty() {
        println!("No segments with usable geometry; nothing to plan.");
        return Ok(());
    }

    // Print the assignment summary
    for (agent, route) in &plan.routes {
        println!(
            "Agent {} ({}): {} segments",
            agent + 1,
            plan.colors.get(agent).map(String::as_str).unwrap_or("#000000"),
            route.len()
        );
        for entry in plan.schedule.get(agent).into_iter().flatten() {
            println!("  {}: {}", entry.date, entry.streets.join(", "));
        }
    }

    // Save the flattened table
    let output_path = "assignment.csv";
    println!("Saving assignment table to: {}", output_path);
    let file = fs::File::create(output_path)?;
    export::write_csv(&plan.rows, file)?;

    Ok(())
}
