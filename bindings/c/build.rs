//! Generates `include/gramkernel.h` from the exported C API.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let Ok(crate_dir) = env::var("CARGO_MANIFEST_DIR").map(PathBuf::from) else {
        return;
    };
    let include_dir = crate_dir.join("include");

    let config = match cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(config) => config,
        Err(err) => {
            println!("cargo:warning=skipping header generation: {err}");
            return;
        }
    };

    if let Err(err) = std::fs::create_dir_all(&include_dir) {
        println!("cargo:warning=cannot create {}: {err}", include_dir.display());
        return;
    }

    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            bindings.write_to_file(include_dir.join("gramkernel.h"));
        }
        Err(err) => println!("cargo:warning=header generation failed: {err}"),
    }
}
