fn main() {
    // Re-run if the configured secret changes between builds
    println!("cargo:rerun-if-env-changed=FOLIO_ADMIN_SECRET");

    let secret =
        std::env::var("FOLIO_ADMIN_SECRET").unwrap_or_else(|_| "folio-admin".to_string());

    println!("cargo:rustc-env=FOLIO_ADMIN_SECRET={secret}");
}
