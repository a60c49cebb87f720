fn main() {
    // Emit ESP-IDF link/sysenv info only for flash builds; host-target
    // test builds have no IDF environment to export.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
