#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Detection, both decoders and the streaming path must agree and never panic
    let parsed = stlquote::parse(data);
    let streamed = stlquote::analyze_bytes(data);

    match (parsed, streamed) {
        (Ok(mesh), Ok(analysis)) => assert_eq!(mesh.analyze(), analysis),
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("parse and streaming disagree: {:?} vs {:?}", a.map(|m| m.triangle_count()), b),
    }
});
