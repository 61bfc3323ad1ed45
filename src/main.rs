use std::{
    fs::File,
    io::{self, BufWriter, Write},
    time::Instant,
};

use log::info;

use geotour::{
    Place, Result, Route, SolveRequest, SolverOptions, logging, read_places, resolve_start, solve,
    write_route_geojson,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");
    let places = read_places(&options)?;
    info!("input: n={}", places.len());

    let start = match options.start_name() {
        Some(name) => Some(resolve_start(&places, name)?),
        None => None,
    };
    let request = SolveRequest {
        start,
        closed: options.closed,
        time_limit: options.time_limit(),
    };
    let route = solve(&places, &request)?;

    write_route(&options, &places, &route)?;
    if let Some(path) = options.geojson_path() {
        let file = File::create(path)?;
        write_route_geojson(BufWriter::new(file), &places, &route, options.closed)?;
        info!("export: geojson path={}", path.display());
    }

    info!(
        "output: n={} total_km={:.3} time={:.2}s",
        route.order.len(),
        route.total_km,
        now.elapsed().as_secs_f32()
    );
    route.metrics(&places, options.closed, options.outlier_factor);

    Ok(())
}

fn write_route(options: &SolverOptions, places: &[Place], route: &Route) -> Result<()> {
    match options.output_path() {
        Some(path) => print_route(&mut BufWriter::new(File::create(path)?), places, route),
        None => print_route(&mut io::stdout().lock(), places, route),
    }
}

fn print_route<W: Write>(writer: &mut W, places: &[Place], route: &Route) -> Result<()> {
    for place in route.stops(places) {
        writeln!(writer, "{place}")?;
    }
    Ok(())
}
