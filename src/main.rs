fn main() {
    if let Err(err) = tagwall::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
