fn main() {
    // ESP-IDF link arguments are only meaningful when the firmware feature is
    // active; host builds (tests) skip them.
    if std::env::var("CARGO_FEATURE_ESP").is_ok() {
        embuild::espidf::sysenv::output();
    }
    println!("cargo:rerun-if-changed=cfg.toml");
}
