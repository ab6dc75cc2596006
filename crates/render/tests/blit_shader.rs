use std::fs;
use std::path::Path;

fn validate_shader(path: &Path) -> naga::Module {
    let src = fs::read_to_string(path).expect("read shader");
    let module = naga::front::wgsl::parse_str(&src).expect("wgsl parse");
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("wgsl validate");
    module
}

#[test]
fn compile_blit_shader() {
    let shader = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/blit.wgsl");
    let module = validate_shader(&shader);

    let entries: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(entries.contains(&"vs_main"));
    assert!(entries.contains(&"fs_main"));
}
