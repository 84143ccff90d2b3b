#![no_main]

use libfuzzer_sys::fuzz_target;
use stlquote::{EngineConfig, MaterialCatalog, StlEncoding, check_fit, quote_by_id};

fuzz_target!(|data: &[u8]| {
    // Exercise analysis, fit checking and quoting on whatever parses
    let Ok(mesh) = stlquote::parse(data) else {
        return;
    };

    let analysis = mesh.analyze();
    let config = EngineConfig::default();
    let _ = check_fit(&analysis.dimensions, config.build_envelope());

    let catalog = MaterialCatalog::example();
    let infill = f64::from(data.first().copied().unwrap_or(20) % 101);
    let quantity = u32::from(data.last().copied().unwrap_or(1) % 52);
    let _ = quote_by_id(&analysis, &catalog, "pla", infill, quantity, &config);

    // Binary input already has f32 coordinates, so a binary rewrite must parse back
    if mesh.encoding() == StlEncoding::Binary {
        let bytes = stlquote::writer::to_binary_bytes(&mesh).unwrap();
        let reparsed = stlquote::parse(&bytes).unwrap();
        assert_eq!(reparsed.triangle_count(), mesh.triangle_count());
    }
});
