use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let crate_dir = env::var("CARGO_MANIFEST_DIR")?;
    let output_file = PathBuf::from(&crate_dir).join("../../BlastEffectsFFI.h");

    // Generate C bindings using cbindgen
    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("BLAST_EFFECTS_FFI_H")
        .with_documentation(true)
        .with_pragma_once(false)
        .generate()?
        .write_to_file(output_file);

    println!("cargo:rerun-if-changed=src");
    Ok(())
}
