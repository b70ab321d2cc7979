fn main() {
    // Emit ESP-IDF linker/env metadata only for device builds; host builds
    // (tests, clippy) have no IDF toolchain to probe.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
