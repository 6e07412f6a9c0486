use std::{fs, io::Write, time::Instant};

use log::info;

use tsp_bnb_core::{Result, SolverOptions, Tour, load_graph, logging, solve_with};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let graph = load_graph(&options)?;
    let (tour, report) = solve_with(&graph, &options.search_options()?)?;
    tour.verify(&graph)?;

    if report.cancelled {
        log::warn!("search stopped early; the tour is the best found, not a proven optimum");
    }

    write_tour(&options, &tour)?;

    info!(
        "output: n={} cost={} time={:.2}s",
        graph.n(),
        tour.cost,
        now.elapsed().as_secs_f32()
    );
    tour.metrics(&graph);

    Ok(())
}

fn write_tour(options: &SolverOptions, tour: &Tour) -> Result<()> {
    let mut out = String::new();
    for node in &tour.path {
        out.push_str(&node.to_string());
        out.push('\n');
    }
    out.push_str(&format!("cost {}\n", tour.cost));

    match options.output_path() {
        Some(path) => fs::write(path, out)?,
        None => std::io::stdout().lock().write_all(out.as_bytes())?,
    }
    Ok(())
}
