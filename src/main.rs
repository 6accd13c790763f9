fn main() {
    pathd_cmd::run();
}
