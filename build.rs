fn main() {
    println!("cargo:rerun-if-env-changed=THERMOGATE_CONFIG");

    // ESP-IDF link arguments are only needed for the firmware image; host
    // builds (tests) skip them entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
