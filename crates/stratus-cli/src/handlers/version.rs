pub fn run() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}
