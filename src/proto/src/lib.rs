pub mod pathd {
    include!("pathd.v1.rs");
}
