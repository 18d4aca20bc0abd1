use std::env;
use std::path::PathBuf;

const ARCHIVE: &str = "scriptures.zip";

const DOCUMENTS: [&str; 5] = [
    "book-of-mormon.json",
    "doctrine-and-covenants.json",
    "pearl-of-great-price.json",
    "old-testament.json",
    "new-testament.json",
];

fn main() {
    println!("cargo:rustc-check-cfg=cfg(embedded_archive)");
    println!("cargo:rustc-check-cfg=cfg(embedded_documents)");
    println!("cargo:rerun-if-changed=data");

    if env::var_os("CARGO_FEATURE_EMBEDDED_CORPUS").is_none() {
        return;
    }

    let data = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join("data");

    if data.join(ARCHIVE).is_file() {
        println!("cargo:rustc-cfg=embedded_archive");
    } else {
        println!("cargo:warning=embedded-corpus: data/{} not found, not embedding it", ARCHIVE);
    }

    let missing: Vec<&str> = DOCUMENTS
        .iter()
        .copied()
        .filter(|file| !data.join(file).is_file())
        .collect();
    if missing.is_empty() {
        println!("cargo:rustc-cfg=embedded_documents");
    } else {
        println!(
            "cargo:warning=embedded-corpus: missing {} in data/, not embedding loose documents",
            missing.join(", ")
        );
    }
}
