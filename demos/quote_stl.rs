//! Quote an STL file from the command line
//!
//! Usage: cargo run --example quote_stl -- <file.stl> [material] [infill%] [quantity]
//!
//! Set RUST_LOG=debug to see parser and calculator logging.

use std::process::ExitCode;

use stlquote::{EngineConfig, MaterialCatalog, Mesh, check_fit, quote_by_id};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.stl> [material] [infill%] [quantity]", args[0]);
        return ExitCode::FAILURE;
    }

    match run(&args[1..]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(err) = e.downcast_ref::<stlquote::Error>() {
                eprintln!("Hint: {}", err.hint());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = &args[0];
    let material = args.get(1).map(String::as_str).unwrap_or("pla");
    let infill: f64 = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(20.0);
    let quantity: u32 = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(1);

    let mesh = Mesh::from_file(path)?;
    let analysis = mesh.analyze();
    let config = EngineConfig::default();

    println!("File:        {} ({} STL)", path, mesh.encoding());
    if let Some(name) = mesh.name() {
        println!("Solid:       {}", name);
    }
    println!("Triangles:   {}", analysis.triangle_count);
    println!("Volume:      {:.2} cm³", analysis.volume_cm3);
    println!("Surface:     {:.2} cm²", analysis.surface_area_cm2());
    println!("Dimensions:  {}", analysis.dimensions);
    if let Some(warning) = &analysis.warning {
        println!("Warning:     {}", warning);
    }

    let fit = check_fit(&analysis.dimensions, config.build_envelope());
    println!("Build plate: {}", fit);

    let catalog = MaterialCatalog::example();
    let quote = quote_by_id(&analysis, &catalog, material, infill, quantity, &config)
        .map_err(stlquote::Error::from)?;

    println!();
    println!("Material:    {} at {}% infill ({})", material, infill, quote.infill_profile.label());
    println!("Weight:      {:.1} g", quote.material_weight_grams);
    println!("Print time:  {:.1} h", quote.print_time_hours);
    println!("Material:    {:.2}", quote.material_cost);
    println!("Machine:     {:.2}", quote.print_time_cost);
    println!("Setup:       {:.2}", quote.setup_cost);
    println!("Total (x{}): {:.2}", quote.quantity, quote.total);

    Ok(())
}
